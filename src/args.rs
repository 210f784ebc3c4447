//! Imagemagick argument parsing.
//!
//! We cannot use an argument parsing library because imagemagick arguments are unconventional:
//! they are prefixed by -, not --. So we need to hand-roll our own parser.

use std::ffi::{OsStr, OsString};

use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::{arg_parsers::FileArg, error::MagickError, plan::ExecutionPlan, wm_err};

#[derive(EnumString, IntoStaticStr, VariantArray, Debug, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "kebab-case")]
pub enum Arg {
    Colorspace,
    Compress,
    Density,
    Quality,
    Strip,
}

impl Arg {
    pub fn needs_value(&self) -> bool {
        match self {
            Arg::Colorspace => true,
            Arg::Compress => true,
            Arg::Density => true,
            Arg::Quality => true,
            Arg::Strip => false,
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self {
            Arg::Colorspace => "set image colorspace",
            Arg::Compress => "type of pixel compression when writing the image",
            Arg::Density => "horizontal and vertical density of the image",
            Arg::Quality => "JPEG/MIFF/PNG compression level",
            Arg::Strip => "strip image of all profiles and comments",
        }
    }
}

pub fn parse_args(mut args: Vec<OsString>) -> Result<ExecutionPlan, MagickError> {
    // maybe_print_help should take care of it, but this won't hurt
    if args.len() <= 1 {
        return Err(wm_err!("No command-line arguments provided"));
    }

    // imagemagick seems to first determine the output filename, and complains if it's not right.
    // Contrary to the documentation about -flags being treated as filenames by default,
    // the observed behavior on my system is that they're only ever parsed as flags.
    let output_filename = args.pop().unwrap();
    // imagemagick rejects output filenames that look like arguments
    if starts_with_sign(&output_filename) {
        return Err(wm_err!(
            "missing an image filename `{}'",
            output_filename.to_string_lossy()
        ));
    }

    let mut plan = ExecutionPlan::default();
    plan.set_output_file(FileArg::parse(&output_filename)?);

    let mut iter = args.into_iter().skip(1); // skip argv[0], path to our binary
    while let Some(raw_arg) = iter.next() {
        if starts_with_sign(&raw_arg) {
            // A file named "-foobar.jpg" will be parsed as an option.
            // Sadly imagemagick does not support the -- convention to separate options and filenames,
            // and there is nothing we can do about it without introducing incompatibility in argument parsing.
            let (_sign, string_arg) = sign_and_arg_name(raw_arg)?;
            let arg = Arg::try_from(string_arg.as_str())
                .map_err(|_| wm_err!("unrecognized option `-{}'", string_arg))?;
            let value = if arg.needs_value() {
                let value = iter.next().ok_or_else(|| {
                    wm_err!("argument requires a value: -{}", string_arg)
                })?;
                Some(value)
            } else {
                None
            };
            plan.apply_arg(arg, value.as_deref())?;
        } else {
            plan.set_input_file(FileArg::parse(&raw_arg)?)?;
        }
    }
    if !plan.has_input() {
        return Err(wm_err!("no images defined")); // mimics imagemagick
    }
    Ok(plan)
}

/// Checks if the string starts with a `-` or a `+`, other than `-` alone, which means stdio
fn starts_with_sign(arg: &OsStr) -> bool {
    let bytes = arg.as_encoded_bytes();
    let first_byte = bytes.first();
    (first_byte == Some(&b'-') || first_byte == Some(&b'+'))
        && bytes.len() > 1
        // Anything starting with two dashes instead of one is treated as filename
        && bytes.get(1) != Some(&b'-')
}

/// Splits the string into a sign (- or +) and argument name
fn sign_and_arg_name(raw_arg: OsString) -> Result<(u8, String), MagickError> {
    let mut string = raw_arg
        .into_string()
        .map_err(|s| wm_err!("unrecognized option `{}'", s.to_string_lossy()))?;
    let sign = string.remove(0);
    Ok((sign as u8, string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{colorspace::Colorspace, density::Density, native::CompressionType};

    fn args(list: &[&str]) -> Vec<OsString> {
        std::iter::once("wm-convert")
            .chain(list.iter().copied())
            .map(OsString::from)
            .collect()
    }

    #[test]
    fn options_land_in_the_info() {
        let plan = parse_args(args(&[
            "in.png",
            "-quality",
            "85",
            "-compress",
            "Zip",
            "-density",
            "72x144",
            "-colorspace",
            "gray",
            "jpg:out.bin",
        ]))
        .unwrap();
        let info = plan.info();
        assert_eq!(info.quality(), 85);
        assert_eq!(info.compression(), CompressionType::Zip);
        assert_eq!(info.density(), Some(Density::new(72, 144)));
        assert_eq!(info.colorspace(), Colorspace::Gray);
        assert_eq!(info.format(), "jpg");
    }

    #[test]
    fn bad_compression_is_reported_like_imagemagick() {
        let err = parse_args(args(&["in.png", "-compress", "bogus", "out.png"])).unwrap_err();
        assert!(err
            .0
            .contains("invalid argument for option `-compress': bogus"));
    }

    #[test]
    fn missing_value() {
        let err = parse_args(args(&["in.png", "-quality"])).unwrap_err();
        // the dangling value is taken as the output filename first
        assert!(err.0.contains("missing an image filename `-quality'"));

        let err = parse_args(args(&["-strip", "in.png", "-density", "out.png"])).unwrap_err();
        assert!(err.0.contains("argument requires a value: -density"));
    }

    #[test]
    fn unknown_option() {
        let err = parse_args(args(&["-frobnicate", "in.png", "out.png"])).unwrap_err();
        assert!(err.0.contains("unrecognized option `-frobnicate'"));
    }

    #[test]
    fn no_input() {
        let err = parse_args(args(&["-strip", "out.png"])).unwrap_err();
        assert!(err.0.contains("no images defined"));
    }

    #[test]
    fn dash_is_a_filename() {
        assert!(!starts_with_sign(OsStr::new("-")));
        assert!(starts_with_sign(OsStr::new("-strip")));
        assert!(starts_with_sign(OsStr::new("+strip")));
        assert!(!starts_with_sign(OsStr::new("--file.png")));
    }

    #[test]
    fn arg_names() {
        assert_eq!(Arg::try_from("compress"), Ok(Arg::Compress));
        let name: &'static str = Arg::Colorspace.into();
        assert_eq!(name, "colorspace");
    }
}
