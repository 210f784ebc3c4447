use std::io::Write;

use image::codecs::avif::AvifEncoder;

use crate::encoders::common;
use crate::{error::MagickError, image::Image, info::Info, native::MagickLibrary, wm_try};

pub fn encode<W: Write, L: MagickLibrary>(
    image: &Image,
    writer: &mut W,
    info: &Info<L>,
) -> Result<(), MagickError> {
    // TODO: quality conversion might not be bug-compatible with imagemagick
    let quality = common::quality(info).map_or(50, |q| q.min(100) as u8);
    let mut encoder = AvifEncoder::new_with_speed_quality(writer, 4, quality);
    common::write_icc(&mut encoder, image);
    // ravif already discards alpha channel automatically if all pixels are opaque,
    // so no need to explicitly convert on our end
    wm_try!(image.pixels.write_with_encoder(encoder));
    Ok(())
}
