use std::io::{BufRead, Cursor, Read, Seek};

use image::{DynamicImage, ImageDecoder, ImageFormat, ImageReader, ImageResult};

use crate::{arg_parsers::Location, error::MagickError, image::Image, wm_err, wm_try};

/// If the format has not been explicitly specified, guesses the format based on file contents.
pub fn decode(location: &Location, format: Option<ImageFormat>) -> Result<Image, MagickError> {
    let image = match location {
        Location::Path(path) => {
            let reader = ImageReader::open(path)
                .map_err(|error| wm_err!("unable to open image '{}': {}", path.display(), error))?;
            decode_from(reader, format)
        }
        Location::Stdio => {
            // format detection needs Seek, which stdin doesn't implement
            let mut buffer = Vec::new();
            wm_try!(std::io::stdin().lock().read_to_end(&mut buffer));
            decode_from(ImageReader::new(Cursor::new(buffer)), format)
        }
    };
    Ok(wm_try!(image))
}

fn decode_from<R: BufRead + Seek>(
    mut reader: ImageReader<R>,
    format: Option<ImageFormat>,
) -> ImageResult<Image> {
    match format {
        Some(format) => reader.set_format(format),
        None => reader = reader.with_guessed_format()?,
    }
    let format = reader.format();
    let mut decoder = reader.into_decoder()?;
    let icc = decoder.icc_profile()?;
    let pixels = DynamicImage::from_decoder(decoder)?;
    tracing::debug!(
        ?format,
        width = pixels.width(),
        height = pixels.height(),
        "decoded image"
    );
    Ok(Image {
        format,
        icc,
        pixels,
    })
}
