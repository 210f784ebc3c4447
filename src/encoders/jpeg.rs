use std::{borrow::Cow, io::Write};

use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};
use image::{ColorType, DynamicImage};

use crate::encoders::common;
use crate::{error::MagickError, image::Image, info::Info, native::MagickLibrary, wm_try};

pub fn encode<W: Write, L: MagickLibrary>(
    image: &Image,
    writer: &mut W,
    info: &Info<L>,
) -> Result<(), MagickError> {
    // imagemagick estimates the quality of the input JPEG somehow according to
    // https://www.imagemagick.org/script/command-line-options.php#quality
    // but we don't do that yet
    let quality = common::quality(info).map_or(92, |q| q.clamp(1, 100) as u8);
    let mut encoder = JpegEncoder::new_with_quality(writer, quality);
    if let Some(density) = info.density() {
        encoder.set_pixel_density(PixelDensity {
            density: (saturate_u16(density.x), saturate_u16(density.y)),
            unit: PixelDensityUnit::Inches,
        });
    }
    common::write_icc(&mut encoder, image);
    Ok(wm_try!(jpeg_compatible(&image.pixels).write_with_encoder(encoder)))
}

fn saturate_u16(value: u32) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}

/// JPEG has no alpha channel and only 8 bits per channel.
fn jpeg_compatible(pixels: &DynamicImage) -> Cow<'_, DynamicImage> {
    match pixels.color() {
        ColorType::L8 | ColorType::Rgb8 => Cow::Borrowed(pixels),
        ColorType::La8 | ColorType::L16 | ColorType::La16 => {
            Cow::Owned(DynamicImage::ImageLuma8(pixels.to_luma8()))
        }
        _ => Cow::Owned(DynamicImage::ImageRgb8(pixels.to_rgb8())),
    }
}
