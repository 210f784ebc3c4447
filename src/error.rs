use std::fmt::{Debug, Display};

/// Errors from changing an [`Info`](crate::Info).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfoError {
    /// The value was not recognized. Carries the rejected input verbatim.
    #[error("invalid argument `{0}'")]
    InvalidArgument(String),
}

pub struct MagickError(pub String);

impl Display for MagickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Debug for MagickError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MagickError").field(&self.0).finish()
    }
}

impl std::error::Error for MagickError {}

impl From<InfoError> for MagickError {
    fn from(err: InfoError) -> Self {
        crate::wm_err!(err)
    }
}

#[macro_export]
macro_rules! wm_err {
    ($fmt:literal $(, $($arg:tt)+)?) => {
        $crate::wm_err!(format!($fmt $(, $($arg)+)?))
    };
    ($msg:expr) => {
        $crate::error::MagickError(format!(
            "wondermagick: {} @ {}:{}:{}",
            $msg,
            file!(),
            line!(),
            column!()
        ))
    };
}

#[macro_export]
macro_rules! wm_try {
    ($expr:expr $(,)?) => {
        match $expr {
            std::result::Result::Ok(val) => val,
            std::result::Result::Err(err) => {
                return std::result::Result::Err($crate::wm_err!(err));
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_error_keeps_the_input() {
        let err = InfoError::InvalidArgument("Bogus".to_owned());
        assert_eq!(err.to_string(), "invalid argument `Bogus'");
        let magick: MagickError = err.into();
        assert!(magick.0.starts_with("wondermagick: invalid argument `Bogus' @ "));
    }

    #[test]
    fn wm_err_formats_arguments() {
        let err = wm_err!("no encode delegate for `{}'", "FOO");
        assert!(err.0.contains("no encode delegate for `FOO'"));
    }
}
