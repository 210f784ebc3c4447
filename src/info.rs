//! [`Info`] specifies the encoding parameters like format and quality used when encoding an image.
//!
//! It owns exactly one [`ImageInfo`] record obtained from a [`MagickLibrary`]
//! and hands it back to the library exactly once. When the record goes back is up to the caller:
//!
//! * [`Info::scoped`] releases it as soon as the closure returns;
//! * [`Info::release`] releases it on the spot;
//! * [`Info::into_record`] moves it to a new owner, who becomes responsible for it;
//! * otherwise it is released when the handle is dropped.

use std::fmt::Debug;

use crate::{
    colorspace::Colorspace,
    compression::Compression,
    density::Density,
    error::InfoError,
    native::{self, Builtin, CompressionType, ImageInfo, MagickLibrary, MagickSize},
};

/// Who is expected to give the record back to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Release {
    /// Dropping the handle releases the record.
    Automatic,
    /// The caller releases the record or moves it out.
    /// Dropping a handle that still holds it is a bug in the caller, but the record is released anyway.
    Manual,
}

pub struct Info<L: MagickLibrary = Builtin> {
    // `None` once the record has been released or moved out
    record: Option<Box<ImageInfo>>,
    library: L,
    release: Release,
}

impl Info {
    /// Creates parameters initialized to the library defaults.
    /// They are released when the handle is dropped.
    pub fn new() -> Self {
        Self::new_with_library(Builtin)
    }

    /// Like [`Info::new`], but the caller is expected to either [`release`](Info::release) the record
    /// or take it over with [`into_record`](Info::into_record).
    pub fn new_base() -> Self {
        Self::new_base_with_library(Builtin)
    }

    /// Runs `f` with freshly created parameters and releases them before returning.
    pub fn scoped<R>(f: impl FnOnce(&mut Info) -> R) -> R {
        Self::scoped_with_library(Builtin, f)
    }
}

impl Default for Info {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: MagickLibrary> Info<L> {
    pub fn new_with_library(library: L) -> Self {
        Self::acquire(library, Release::Automatic)
    }

    pub fn new_base_with_library(library: L) -> Self {
        Self::acquire(library, Release::Manual)
    }

    pub fn scoped_with_library<R>(library: L, f: impl FnOnce(&mut Self) -> R) -> R {
        // automatic, so that a panic in `f` still releases without complaint
        let mut info = Self::new_with_library(library);
        let result = f(&mut info);
        info.release();
        result
    }

    fn acquire(library: L, release: Release) -> Self {
        let record = library.clone_image_info(None);
        tracing::trace!(?release, "acquired image info");
        Self {
            record: Some(record),
            library,
            release,
        }
    }

    /// The underlying record, for inspection.
    pub fn record(&self) -> &ImageInfo {
        self.record
            .as_deref()
            .expect("the record is only taken out by methods that consume the handle")
    }

    fn record_mut(&mut self) -> &mut ImageInfo {
        self.record
            .as_deref_mut()
            .expect("the record is only taken out by methods that consume the handle")
    }

    /// Returns the format used for encoding the image, e.g. `PNG`.
    pub fn format(&self) -> String {
        native::read_text(&self.record().magick)
    }

    /// Sets the image format for encoding this image.
    ///
    /// An empty string clears the format. The name is not checked here;
    /// encoding fails later if no encoder handles it.
    /// Names longer than [`MAX_TEXT_LEN`](native::MAX_TEXT_LEN) bytes are truncated.
    pub fn set_format(&mut self, format: &str) {
        let record = self.record_mut();
        if format.is_empty() {
            record.magick[0] = 0;
        } else {
            native::write_text(&mut record.magick, format);
        }
    }

    /// Returns the quality used when compressing the image. 0 means the encoder picks.
    /// This parameter does not affect all formats.
    pub fn quality(&self) -> u64 {
        u64::from(self.record().quality)
    }

    /// Sets the quality used when compressing the image.
    ///
    /// The record stores a [`MagickSize`]; values that don't fit wrap around.
    pub fn set_quality(&mut self, quality: u64) {
        self.record_mut().quality = quality as MagickSize;
    }

    pub fn compression(&self) -> CompressionType {
        self.record().compression
    }

    /// Sets the compression by its case-insensitive name, see [`Compression`].
    /// Leaves the current compression alone if the name is not recognized.
    pub fn set_compression(&mut self, compression: &str) -> Result<(), InfoError> {
        let compression: Compression = compression.parse()?;
        self.set_compression_type(compression);
        Ok(())
    }

    pub fn set_compression_type(&mut self, compression: Compression) {
        self.record_mut().compression = compression.into();
    }

    /// Returns the density set with [`set_density`](Info::set_density),
    /// or `None` if there is none or the record holds something unparseable.
    pub fn density(&self) -> Option<Density> {
        Density::from_text(self.density_text()?)
    }

    pub fn density_text(&self) -> Option<&str> {
        self.record().density.as_deref()
    }

    /// Records the resolution as `WxH` text owned by the record.
    /// Any value is accepted, including zero.
    pub fn set_density(&mut self, x_density: u32, y_density: u32) {
        let text = Density::new(x_density, y_density).to_string();
        self.record_mut().density = Some(text);
    }

    /// Returns the colorspace used when encoding the image.
    pub fn colorspace(&self) -> Colorspace {
        self.record().colorspace.into()
    }

    /// Sets the colorspace used when encoding the image.
    /// Not every colorspace can be encoded, see [`Colorspace::color_model`].
    pub fn set_colorspace(&mut self, colorspace: Colorspace) {
        self.record_mut().colorspace = colorspace.into();
    }

    /// Gives the record back to the library now.
    pub fn release(mut self) {
        self.release_record();
    }

    /// Moves the record out of the handle.
    /// The library is not told; the new owner must dispose of the record.
    pub fn into_record(mut self) -> Box<ImageInfo> {
        self.record
            .take()
            .expect("the record is only taken out by methods that consume the handle")
    }

    /// Idempotent: only the first call reaches the library.
    fn release_record(&mut self) {
        if let Some(record) = self.record.take() {
            self.library.destroy_image_info(record);
            tracing::trace!(release = ?self.release, "released image info");
        }
    }
}

impl<L: MagickLibrary> Drop for Info<L> {
    fn drop(&mut self) {
        if self.release == Release::Manual && self.record.is_some() {
            tracing::warn!("manually managed image info dropped without being released");
        }
        self.release_record();
    }
}

impl<L: MagickLibrary> Debug for Info<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("Info");
        if let Some(record) = &self.record {
            s.field("format", &native::read_text(&record.magick))
                .field("quality", &record.quality)
                .field("compression", &record.compression)
                .field("colorspace", &record.colorspace)
                .field("density", &record.density);
        }
        s.field("release", &self.release).finish()
    }
}
