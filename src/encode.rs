use std::{
    borrow::Cow,
    ffi::OsStr,
    fs::File,
    io::{BufWriter, Seek, Write},
};

use image::{DynamicImage, ImageFormat};

use crate::{
    arg_parsers::Location,
    colorspace::ColorModel,
    encoders,
    error::MagickError,
    image::Image,
    info::Info,
    native::MagickLibrary,
    wm_err, wm_try,
};

/// Metadata to remove before encoding, set by `-strip`.
/// Exif is never carried over, so the ICC profile is all there is to strip.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)] // bools default to false
pub struct Strip {
    pub icc: bool,
}

impl Strip {
    pub fn set_all(&mut self, new_val: bool) {
        // exhaustive construction so that the compiler complains if a field is added
        *self = Self { icc: new_val };
    }
}

/// Encodes `image` to `location` with the parameters in `info`.
pub fn encode<L: MagickLibrary>(
    image: &mut Image,
    location: &Location,
    info: &Info<L>,
    strip: Strip,
) -> Result<(), MagickError> {
    // Correctly stripping metadata when requested is a major privacy concern:
    // unstripped images may reveal the user's geographic location when phone cameras embed GPS coordinates.
    // So it is done here once and for all, without trusting any individual format handlers.
    let icc = if strip.icc { image.icc.take() } else { None };

    let result = encode_inner(image, location, info);

    // put the metadata back so that the image is unchanged for the caller
    if icc.is_some() {
        image.icc = icc;
    }

    result
}

fn encode_inner<L: MagickLibrary>(
    image: &Image,
    location: &Location,
    info: &Info<L>,
) -> Result<(), MagickError> {
    let format = choose_encoding_format(image, location, info)?;
    let image = convert_colorspace(image, info)?;
    tracing::debug!(?format, ?info, "encoding image");

    let file = match location {
        // `File::create` automatically truncates (overwrites) the file if it exists.
        Location::Path(path) => File::create(path)
            .map_err(|error| wm_err!("unable to open image '{}': {}", path.display(), error))?,
        // Some of the encoders require Seek, which Stdout doesn't implement.
        // We write to a temporary file and then print out the content at the end.
        Location::Stdio => wm_try!(tempfile::tempfile()),
    };
    let mut writer = BufWriter::new(file);

    match format {
        #[cfg(feature = "png")]
        ImageFormat::Png => encoders::png::encode(&image, &mut writer, info)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => encoders::jpeg::encode(&image, &mut writer, info)?,
        #[cfg(feature = "webp")]
        ImageFormat::WebP => encoders::webp::encode(&image, &mut writer, info)?,
        #[cfg(feature = "avif")]
        ImageFormat::Avif => encoders::avif::encode(&image, &mut writer, info)?,
        _ => wm_try!(image.pixels.write_to(&mut writer, format)),
    }

    match location {
        Location::Path(_) => {
            // Dropping the writer would flush it too, but would swallow the errors.
            wm_try!(writer.flush());
        }
        Location::Stdio => {
            let mut file = wm_try!(writer.into_inner());
            wm_try!(file.seek(std::io::SeekFrom::Start(0)));
            let mut stdout = std::io::stdout().lock();
            wm_try!(std::io::copy(&mut file, &mut stdout));
            wm_try!(stdout.flush());
        }
    }

    Ok(())
}

fn choose_encoding_format<L: MagickLibrary>(
    image: &Image,
    location: &Location,
    info: &Info<L>,
) -> Result<ImageFormat, MagickError> {
    let explicit = info.format();
    if !explicit.is_empty() {
        // the format is only checked now, setting it accepts anything
        return ImageFormat::from_extension(explicit.to_ascii_lowercase()).ok_or_else(|| {
            wm_err!(
                "no encode delegate for this image format `{}'",
                explicit.to_ascii_uppercase()
            )
        });
    }
    // if format was not explicitly specified, guess based on the output path
    if let Location::Path(path) = location {
        if let Ok(format) = ImageFormat::from_path(path) {
            return Ok(format);
        }
    }
    // if that fails, use the input format (like ImageMagick)
    if let Some(format) = image.format {
        return Ok(format);
    }
    let extension = match location {
        // fallback to empty string matches imagemagick
        Location::Path(path) => path.extension().unwrap_or(OsStr::new("")),
        Location::Stdio => OsStr::new(""),
    };
    Err(wm_err!(
        "no encode delegate for this image format `{}'",
        extension.to_ascii_uppercase().to_string_lossy()
    ))
}

/// The encoders don't know about colorspaces, so the pixels are converted up front.
fn convert_colorspace<'a, L: MagickLibrary>(
    image: &'a Image,
    info: &Info<L>,
) -> Result<Cow<'a, Image>, MagickError> {
    let colorspace = info.colorspace();
    match colorspace.color_model() {
        Some(ColorModel::Rgb) => Ok(Cow::Borrowed(image)),
        Some(ColorModel::Luma) => {
            tracing::debug!(%colorspace, "converting to grayscale");
            let pixels = to_luma(&image.pixels);
            Ok(Cow::Owned(Image {
                format: image.format,
                icc: image.icc.clone(),
                pixels,
            }))
        }
        None => Err(wm_err!("unsupported colorspace `{}'", colorspace)),
    }
}

fn to_luma(pixels: &DynamicImage) -> DynamicImage {
    let has_alpha = pixels.color().has_alpha();
    let high_precision = pixels.color().bytes_per_pixel() / pixels.color().channel_count() > 1;
    match (has_alpha, high_precision) {
        (false, false) => DynamicImage::ImageLuma8(pixels.to_luma8()),
        (true, false) => DynamicImage::ImageLumaA8(pixels.to_luma_alpha8()),
        (false, true) => DynamicImage::ImageLuma16(pixels.to_luma16()),
        (true, true) => DynamicImage::ImageLumaA16(pixels.to_luma_alpha16()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use image::{ColorType, RgbImage, RgbaImage};

    use super::*;
    use crate::colorspace::Colorspace;

    fn sample() -> Image {
        Image::new(DynamicImage::ImageRgb8(RgbImage::from_fn(4, 4, |x, y| {
            image::Rgb([x as u8 * 60, y as u8 * 60, 200])
        })))
    }

    #[test]
    fn explicit_format_wins() {
        let mut info = Info::new();
        info.set_format("PNG");
        let location = Location::Path(PathBuf::from("out.jpg"));
        let format = choose_encoding_format(&sample(), &location, &info).unwrap();
        assert_eq!(format, ImageFormat::Png);
    }

    #[test]
    fn unknown_explicit_format() {
        let mut info = Info::new();
        info.set_format("bogus");
        let err = choose_encoding_format(&sample(), &Location::Stdio, &info).unwrap_err();
        assert!(err.0.contains("no encode delegate for this image format `BOGUS'"));
    }

    #[test]
    fn format_from_path_then_input() {
        let info = Info::new();
        let location = Location::Path(PathBuf::from("out.webp"));
        assert_eq!(
            choose_encoding_format(&sample(), &location, &info).unwrap(),
            ImageFormat::WebP
        );

        let mut image = sample();
        image.format = Some(ImageFormat::Gif);
        let location = Location::Path(PathBuf::from("out"));
        assert_eq!(
            choose_encoding_format(&image, &location, &info).unwrap(),
            ImageFormat::Gif
        );
    }

    #[test]
    fn no_format_at_all() {
        let info = Info::new();
        let location = Location::Path(PathBuf::from("out.xyz"));
        let err = choose_encoding_format(&sample(), &location, &info).unwrap_err();
        assert!(err.0.contains("`XYZ'"));
    }

    #[test]
    fn gray_colorspace_converts() {
        let mut info = Info::new();
        info.set_colorspace(Colorspace::Gray);
        let image = sample();
        let converted = convert_colorspace(&image, &info).unwrap();
        assert_eq!(converted.pixels.color(), ColorType::L8);
    }

    #[test]
    fn luma_keeps_alpha() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        assert_eq!(to_luma(&image).color(), ColorType::La8);
        let image = DynamicImage::ImageRgb16(image::ImageBuffer::new(2, 2));
        assert_eq!(to_luma(&image).color(), ColorType::L16);
    }

    #[test]
    fn rgb_colorspace_is_untouched() {
        let mut info = Info::new();
        info.set_colorspace(Colorspace::Srgb);
        let image = sample();
        assert!(matches!(
            convert_colorspace(&image, &info).unwrap(),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn unencodable_colorspace_fails() {
        let mut info = Info::new();
        info.set_colorspace(Colorspace::Cmyk);
        let image = sample();
        let err = convert_colorspace(&image, &info).unwrap_err();
        assert!(err.0.contains("unsupported colorspace `CMYK'"));
    }

    #[test]
    fn strip_restores_metadata() {
        let mut image = sample();
        image.icc = Some(vec![1, 2, 3]);
        let mut strip = Strip::default();
        strip.set_all(true);
        let mut info = Info::new();
        info.set_format("null-format");
        // fails on the format, after stripping
        assert!(encode(&mut image, &Location::Stdio, &info, strip).is_err());
        assert_eq!(image.icc, Some(vec![1, 2, 3]));
    }
}
