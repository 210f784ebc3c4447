use std::{ffi::OsStr, num::ParseIntError};

use crate::error::InfoError;

/// Error reporting for argument parsing that mimics imagemagick.
/// Use `.display_with_arg()` to properly present this error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgParseErr {
    pub message: Option<String>,
}

impl ArgParseErr {
    pub fn display_with_arg(&self, arg_name: &str, value: &OsStr) -> String {
        let value = value.to_string_lossy();
        // imagemagick echoes the value back unless there is something more specific to say
        let message = self.message.as_deref().unwrap_or(&value);
        format!("invalid argument for option `-{arg_name}': {message}")
    }

    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_msg(str: impl ToString) -> Self {
        Self {
            message: Some(str.to_string()),
        }
    }
}

impl From<ParseIntError> for ArgParseErr {
    fn from(_value: ParseIntError) -> Self {
        Self::new()
    }
}

impl From<InfoError> for ArgParseErr {
    fn from(value: InfoError) -> Self {
        match value {
            // the rejected value is what the user typed, so the plain echo is accurate
            InfoError::InvalidArgument(_) => Self::new(),
        }
    }
}
