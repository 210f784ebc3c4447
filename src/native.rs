//! The image library's side of the boundary: the `ImageInfo` record,
//! its numeric enum codes, and the clone/destroy entry points.
//!
//! The layout follows the C `ImageInfo` struct of imagemagick/graphicsmagick closely enough
//! that the codes and the text extent are interchangeable with it,
//! but every allocation here is an ordinary Rust box.

/// Size of the fixed text buffers in [`ImageInfo`], terminator included.
pub const MAX_TEXT_EXTENT: usize = 2053;

/// Longest text that fits into a fixed buffer while leaving room for the terminator.
pub const MAX_TEXT_LEN: usize = MAX_TEXT_EXTENT - 1;

/// Integer width the library uses for sizes such as `quality`.
pub type MagickSize = u32;

#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CompressionType {
    #[default]
    Undefined = 0,
    None = 1,
    BZip = 2,
    Fax = 3,
    Group4 = 4,
    Jpeg = 5,
    LosslessJpeg = 6,
    Lzw = 7,
    Rle = 8,
    Zip = 9,
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorspaceType {
    #[default]
    Undefined = 0,
    Rgb = 1,
    Gray = 2,
    Transparent = 3,
    Ohta = 4,
    Xyz = 5,
    Ycc = 6,
    Yiq = 7,
    YPbPr = 8,
    Yuv = 9,
    Cmyk = 10,
    Srgb = 11,
    Hsl = 12,
    Hwb = 13,
    Lab = 14,
    CineonLogRgb = 15,
    Rec601Luma = 16,
    Rec601YCbCr = 17,
    Rec709Luma = 18,
    Rec709YCbCr = 19,
}

/// Encoding parameters as the library stores them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Format token such as `PNG`, NUL-terminated.
    pub magick: [u8; MAX_TEXT_EXTENT],
    /// 0 means "use the encoder's default".
    pub quality: MagickSize,
    pub compression: CompressionType,
    pub colorspace: ColorspaceType,
    /// Resolution as `WxH` text, owned by the record once set.
    pub density: Option<String>,
}

impl Default for ImageInfo {
    fn default() -> Self {
        Self {
            magick: [0; MAX_TEXT_EXTENT],
            quality: 0,
            compression: CompressionType::default(),
            colorspace: ColorspaceType::default(),
            density: None,
        }
    }
}

/// Copies `text` into a fixed buffer the way `strncpy` would, minus the overruns:
/// the copy stops at the first NUL in `text` or at [`MAX_TEXT_LEN`] bytes,
/// backing off to a character boundary, and the buffer always ends up terminated.
pub fn write_text(buffer: &mut [u8; MAX_TEXT_EXTENT], text: &str) {
    let end = text.find('\0').unwrap_or(text.len());
    let mut len = end.min(MAX_TEXT_LEN);
    while !text.is_char_boundary(len) {
        len -= 1;
    }
    buffer[..len].copy_from_slice(&text.as_bytes()[..len]);
    buffer[len..].fill(0);
}

/// Reads a fixed buffer up to its terminator.
pub fn read_text(buffer: &[u8; MAX_TEXT_EXTENT]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    String::from_utf8_lossy(&buffer[..end]).into_owned()
}

/// Allocation entry points of the image library.
///
/// Every record returned by [`clone_image_info`](MagickLibrary::clone_image_info)
/// must be passed to [`destroy_image_info`](MagickLibrary::destroy_image_info) at most once.
/// `Box` ownership makes a second call impossible to express.
pub trait MagickLibrary {
    /// Clones `template`, or the library defaults if there is no template.
    fn clone_image_info(&self, template: Option<&ImageInfo>) -> Box<ImageInfo>;

    fn destroy_image_info(&self, info: Box<ImageInfo>);
}

/// The library built into this crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Builtin;

impl MagickLibrary for Builtin {
    fn clone_image_info(&self, template: Option<&ImageInfo>) -> Box<ImageInfo> {
        Box::new(template.cloned().unwrap_or_default())
    }

    fn destroy_image_info(&self, info: Box<ImageInfo>) {
        drop(info);
    }
}
