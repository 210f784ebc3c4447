use std::{ffi::OsStr, path::PathBuf};

use image::ImageFormat;

use crate::{error::MagickError, wm_err};

/// Where an image is read from or written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Location {
    Path(PathBuf),
    /// `-` on the command line
    #[default]
    Stdio,
}

/// A filename argument with the optional `format:` prefix split off,
/// e.g. `png:my-file` or `null:`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileArg {
    pub location: Location,
    /// Lowercase format name from the prefix
    pub format: Option<String>,
}

impl FileArg {
    /// Fails if a format prefix is followed by a path that is not valid UTF-8,
    /// rather than quietly treating the prefix as part of the filename.
    pub fn parse(arg: &OsStr) -> Result<Self, MagickError> {
        let (format, rest) = match split_off_format_prefix(arg)? {
            Some((format, rest)) => (Some(format), rest),
            None => (None, arg),
        };
        let location = if rest.as_encoded_bytes() == b"-" || rest.is_empty() {
            Location::Stdio
        } else {
            Location::Path(PathBuf::from(rest))
        };
        Ok(Self { location, format })
    }

    /// The format prefix as understood by `image`, if it names one.
    pub fn image_format(&self) -> Option<ImageFormat> {
        self.format.as_deref().and_then(ImageFormat::from_extension)
    }

    /// `null:` means the image should not be written anywhere.
    pub fn is_null(&self) -> bool {
        self.format.as_deref() == Some("null")
    }
}

/// Splits `png:foo.jpg` into `("png", "foo.jpg")`.
///
/// Only prefixes naming a format count, so `C:\image.png` and `my:file.png` stay filenames.
fn split_off_format_prefix(arg: &OsStr) -> Result<Option<(String, &OsStr)>, MagickError> {
    let bytes = arg.as_encoded_bytes();
    let Some(colon) = bytes.iter().position(|b| *b == b':') else {
        return Ok(None);
    };
    // a single letter is a drive letter on windows
    if colon < 2 {
        return Ok(None);
    }
    let Ok(prefix) = std::str::from_utf8(&bytes[..colon]) else {
        return Ok(None);
    };
    let prefix = prefix.to_ascii_lowercase();
    if prefix != "null" && ImageFormat::from_extension(&prefix).is_none() {
        return Ok(None);
    }
    // `OsStr` offers no safe way to sub-slice raw bytes on every platform, so the rest has to be UTF-8
    let rest = arg
        .to_str()
        .and_then(|arg| arg.get(colon + 1..))
        .ok_or_else(|| {
            wm_err!(
                "unable to open image `{}': the filename after `{}:' is not valid UTF-8",
                arg.to_string_lossy(),
                prefix
            )
        })?;
    Ok(Some((prefix, OsStr::new(rest))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_path() {
        let arg = FileArg::parse(OsStr::new("out.png")).unwrap();
        assert_eq!(arg.location, Location::Path(PathBuf::from("out.png")));
        assert_eq!(arg.format, None);
    }

    #[test]
    fn dash_is_stdio() {
        let arg = FileArg::parse(OsStr::new("-")).unwrap();
        assert_eq!(arg.location, Location::Stdio);
    }

    #[test]
    fn format_prefix() {
        let arg = FileArg::parse(OsStr::new("PNG:out.bin")).unwrap();
        assert_eq!(arg.location, Location::Path(PathBuf::from("out.bin")));
        assert_eq!(arg.format.as_deref(), Some("png"));
        assert_eq!(arg.image_format(), Some(ImageFormat::Png));
    }

    #[test]
    fn prefix_with_stdio() {
        let arg = FileArg::parse(OsStr::new("jpg:-")).unwrap();
        assert_eq!(arg.location, Location::Stdio);
        assert_eq!(arg.image_format(), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn null_output() {
        let arg = FileArg::parse(OsStr::new("null:")).unwrap();
        assert!(arg.is_null());
        assert_eq!(arg.image_format(), None);
    }

    #[test]
    fn unknown_prefix_is_part_of_the_name() {
        let arg = FileArg::parse(OsStr::new("my:file.png")).unwrap();
        assert_eq!(arg.location, Location::Path(PathBuf::from("my:file.png")));
        assert_eq!(arg.format, None);
    }

    #[test]
    fn drive_letter_is_not_a_prefix() {
        let arg = FileArg::parse(OsStr::new("C:image.png")).unwrap();
        assert_eq!(arg.location, Location::Path(PathBuf::from("C:image.png")));
    }

    #[cfg(unix)]
    #[test]
    fn prefix_before_non_utf8_path_is_reported() {
        use std::os::unix::ffi::OsStrExt;

        let err = FileArg::parse(OsStr::from_bytes(b"png:\xffout.bin")).unwrap_err();
        assert!(err.0.contains("is not valid UTF-8"));
        // without a recognized prefix the bytes are just a filename
        let arg = FileArg::parse(OsStr::from_bytes(b"my:\xffout.bin")).unwrap();
        assert_eq!(arg.format, None);
    }
}
