//! Image encoding parameters (format, quality, compression, colorspace, density)
//! in the shape of imagemagick's `ImageInfo`, and a small `wm-convert` built on them.
//!
//! [`Info`] is the entry point:
//!
//! ```
//! use wondermagick_info::{Colorspace, Info};
//!
//! let format = Info::scoped(|info| {
//!     info.set_format("PNG");
//!     info.set_quality(90);
//!     info.set_colorspace(Colorspace::Gray);
//!     info.set_compression("zip")?;
//!     Ok::<_, wondermagick_info::InfoError>(info.format())
//! });
//! assert_eq!(format.unwrap(), "PNG");
//! ```

#![forbid(unsafe_code)]

#[cfg(feature = "hardened_malloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod arg_parse_err;
mod arg_parsers;
pub mod args;
pub mod colorspace;
pub mod compression;
pub mod decode;
pub mod density;
pub mod encode;
mod encoders;
pub mod error;
pub mod help;
pub mod image;
pub mod info;
pub mod init;
pub mod native;
pub mod plan;

pub use arg_parsers::{FileArg, Location};
pub use colorspace::Colorspace;
pub use compression::Compression;
pub use density::Density;
pub use error::{InfoError, MagickError};
pub use info::Info;
