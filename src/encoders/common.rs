//! Helpers shared between all encoders

use image::ImageEncoder;

use crate::{image::Image, info::Info, native::MagickLibrary};

pub fn write_icc(encoder: &mut impl ImageEncoder, image: &Image) {
    if let Some(icc) = image.icc.clone() {
        let _ = encoder.set_icc_profile(icc); // ignore UnsupportedError
    };
}

/// The quality from `info`, or `None` if the encoder should use its default.
pub fn quality<L: MagickLibrary>(info: &Info<L>) -> Option<u64> {
    match info.quality() {
        0 => None,
        q => Some(q),
    }
}
