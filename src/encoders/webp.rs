use std::io::Write;

use image::{ColorType, DynamicImage};
use webp::{Encoder, WebPMemory};

use crate::encoders::common;
use crate::{error::MagickError, image::Image, info::Info, native::MagickLibrary, wm_err, wm_try};

pub fn encode<W: Write, L: MagickLibrary>(
    image: &Image,
    writer: &mut W,
    info: &Info<L>,
) -> Result<(), MagickError> {
    let quality = common::quality(info);
    // imagemagick signals that the image should be lossless with quality=100
    let lossless = quality == Some(100);
    // default quality is not documented, was determined experimentally
    let quality = quality.map_or(75.0, |q| q.min(100) as f32);

    // the `webp` crate only accepts 8-bit RGB(A)
    let converted;
    let pixels = match image.pixels.color() {
        ColorType::Rgb8 | ColorType::Rgba8 => &image.pixels,
        color if color.has_alpha() => {
            converted = DynamicImage::ImageRgba8(image.pixels.to_rgba8());
            &converted
        }
        _ => {
            converted = DynamicImage::ImageRgb8(image.pixels.to_rgb8());
            &converted
        }
    };

    let encoder = Encoder::from_image(pixels).map_err(|e| wm_err!("WebP encoding failed: {}", e))?;
    let webp: WebPMemory = encoder
        .encode_simple(lossless, quality)
        .map_err(|e| wm_err!("WebP encoding failed: {:?}", e))?;
    // TODO: `webp` crate doesn't support setting the ICC profile:
    // https://github.com/jaredforth/webp/issues/41
    Ok(wm_try!(writer.write_all(&webp)))
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, ImageFormat};

    use super::*;

    #[test]
    fn grayscale_input_is_widened() {
        let image = Image::new(DynamicImage::ImageLuma8(GrayImage::new(5, 5)));
        let mut info = Info::new();
        info.set_quality(100);
        let mut out = Vec::new();
        encode(&image, &mut out, &info).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::WebP);
    }
}
