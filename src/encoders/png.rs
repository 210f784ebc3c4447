use std::io::Write;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};

use crate::encoders::common::{self, write_icc};
use crate::native::{self, MagickLibrary};
use crate::{error::MagickError, image::Image, info::Info, wm_try};

pub fn encode<W: Write, L: MagickLibrary>(
    image: &Image,
    writer: &mut W,
    info: &Info<L>,
) -> Result<(), MagickError> {
    let (compression, filter) = if info.compression() == native::CompressionType::None {
        // stored deflate blocks; filtering would only cost time
        (CompressionType::Uncompressed, FilterType::NoFilter)
    } else {
        quality_to_compression_parameters(common::quality(info))
    };
    tracing::trace!(?compression, ?filter, "png parameters");
    let mut encoder = PngEncoder::new_with_quality(writer, compression, filter);
    write_icc(&mut encoder, image);
    Ok(wm_try!(image.pixels.write_with_encoder(encoder)))
}

// for documentation on conversion of quality to encoding parameters see
// https://www.imagemagick.org/script/command-line-options.php#quality
fn quality_to_compression_parameters(quality: Option<u64>) -> (CompressionType, FilterType) {
    // default is 75 as per https://legacy.imagemagick.org/script/command-line-options.php#quality
    let quality = quality.unwrap_or(75);

    let compression = match quality / 10 {
        n @ 0..=9 => CompressionType::Level(n as u8),
        10.. => CompressionType::Level(9), // in imagemagick large values are treated as 9
    };
    let filter = match quality % 10 {
        0 => FilterType::NoFilter,
        1 => FilterType::Sub,
        2 => FilterType::Up,
        3 => FilterType::Avg,
        4 => FilterType::Paeth,
        // 7 is documented as MNG-only, in practice maps to 5 or 6?
        5..=7 => FilterType::Adaptive,
        // filters 8 and 9 override compression level selection
        8 => return (CompressionType::Fast, FilterType::Adaptive),
        // imagemagick uses filter=None here, but our Fast mode needs filtering
        // to deliver reasonable compression, so use the fastest filter instead
        _ => return (CompressionType::Fast, FilterType::Up),
    };
    (compression, filter)
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageFormat, RgbImage};

    use super::*;

    #[test]
    fn default_quality() {
        assert_eq!(
            quality_to_compression_parameters(None),
            (CompressionType::Level(7), FilterType::Adaptive)
        );
    }

    #[test]
    fn tens_pick_the_level_units_pick_the_filter() {
        assert_eq!(
            quality_to_compression_parameters(Some(94)),
            (CompressionType::Level(9), FilterType::Paeth)
        );
        assert_eq!(
            quality_to_compression_parameters(Some(21)),
            (CompressionType::Level(2), FilterType::Sub)
        );
        assert_eq!(
            quality_to_compression_parameters(Some(1000)),
            (CompressionType::Level(9), FilterType::NoFilter)
        );
        assert_eq!(
            quality_to_compression_parameters(Some(10)),
            (CompressionType::Level(1), FilterType::NoFilter)
        );
        assert_eq!(
            quality_to_compression_parameters(Some(30)),
            (CompressionType::Level(3), FilterType::NoFilter)
        );
    }

    #[test]
    fn eight_and_nine_override_the_level() {
        assert_eq!(
            quality_to_compression_parameters(Some(98)),
            (CompressionType::Fast, FilterType::Adaptive)
        );
        assert_eq!(
            quality_to_compression_parameters(Some(59)),
            (CompressionType::Fast, FilterType::Up)
        );
    }

    #[test]
    fn compress_none_stores_pixels_as_is() {
        // a flat image that deflate would shrink to almost nothing
        let image = Image::new(DynamicImage::ImageRgb8(RgbImage::new(64, 64)));
        let raw_len = image.pixels.as_bytes().len();
        let mut info = Info::new();
        info.set_compression("none").unwrap();
        let mut out = Vec::new();
        encode(&image, &mut out, &info).unwrap();
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Png);
        assert!(out.len() >= raw_len, "{} bytes for {raw_len}", out.len());
    }
}
