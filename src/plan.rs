use std::ffi::OsStr;

use crate::arg_parse_err::ArgParseErr;
use crate::arg_parsers::{numbers::parse_numeric_arg, FileArg, Location};
use crate::args::Arg;
use crate::colorspace::Colorspace;
use crate::decode::decode;
use crate::density::Density;
use crate::encode::{self, Strip};
use crate::info::Info;
use crate::{error::MagickError, wm_err};

/// Plan of what to do with the input file, assembled from the command line
#[derive(Debug, Default)]
pub struct ExecutionPlan {
    input_file: Option<FileArg>,
    output_file: Location,
    /// `null:` was given as the output
    skip_encoding: bool,
    info: Info,
    strip: Strip,
}

impl ExecutionPlan {
    pub fn apply_arg(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), MagickError> {
        let arg_string: &'static str = arg.into();
        if arg.needs_value() != value.is_some() {
            return Err(wm_err!("argument requires a value: -{}", arg_string));
        };

        self.apply_arg_inner(arg, value).map_err(|arg_err| {
            wm_err!(arg_err.display_with_arg(arg_string, value.unwrap_or_default()))
        })?;

        Ok(())
    }

    /// Currently this can only fail due to argument parsing.
    /// Split into its own function due to lack of try{} blocks on stable Rust.
    fn apply_arg_inner(&mut self, arg: Arg, value: Option<&OsStr>) -> Result<(), ArgParseErr> {
        let value = value.unwrap_or_default();
        match arg {
            Arg::Colorspace => self.info.set_colorspace(Colorspace::try_from(value)?),
            Arg::Compress => {
                let name = value.to_str().ok_or_else(ArgParseErr::new)?;
                self.info.set_compression(name)?;
            }
            Arg::Density => {
                let density = Density::try_from(value)?;
                self.info.set_density(density.x, density.y);
            }
            Arg::Quality => self.info.set_quality(parse_numeric_arg(value)?),
            Arg::Strip => self.strip.set_all(true),
        };

        Ok(())
    }

    pub fn set_input_file(&mut self, file: FileArg) -> Result<(), MagickError> {
        if self.input_file.is_some() {
            return Err(wm_err!("only a single input image is supported"));
        }
        if file.format.is_some() && (file.is_null() || file.image_format().is_none()) {
            return Err(wm_err!(
                "no decode delegate for this image format `{}'",
                file.format.unwrap_or_default().to_ascii_uppercase()
            ));
        }
        self.input_file = Some(file);
        Ok(())
    }

    pub fn set_output_file(&mut self, file: FileArg) {
        self.skip_encoding = file.is_null();
        if !self.skip_encoding {
            if let Some(format) = file.format.as_deref() {
                self.info.set_format(format);
            }
        }
        self.output_file = file.location;
    }

    pub fn has_input(&self) -> bool {
        self.input_file.is_some()
    }

    /// The encoding parameters collected so far
    pub fn info(&self) -> &Info {
        &self.info
    }

    pub fn execute(&self) -> Result<(), MagickError> {
        let Some(input) = &self.input_file else {
            return Err(wm_err!("no images defined")); // mimics imagemagick
        };
        let mut image = decode(&input.location, input.image_format())?;
        if self.skip_encoding {
            return Ok(());
        }
        encode::encode(&mut image, &self.output_file, &self.info, self.strip)
    }
}
