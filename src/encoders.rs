//! Encoders for the formats that have settings worth passing on.
//! Everything else goes through the generic `image` writer.

pub mod common;
#[cfg(feature = "avif")]
pub mod avif;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;
#[cfg(feature = "webp")]
pub mod webp;
