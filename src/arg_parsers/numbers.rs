use std::{ffi::OsStr, str::FromStr};

use crate::arg_parse_err::ArgParseErr;

/// Parses `input` into `T`, ignoring surrounding whitespace like imagemagick does.
pub fn strip_and_parse_number<T>(input: &str) -> Result<T, T::Err>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    input.trim().parse::<T>()
}

/// Parses a numeric option value such as the one passed to `-quality`.
pub fn parse_numeric_arg<T>(value: &OsStr) -> Result<T, ArgParseErr>
where
    T: FromStr,
    T::Err: std::error::Error,
{
    let text = value.to_str().ok_or_else(ArgParseErr::new)?;
    strip_and_parse_number(text).map_err(|_| ArgParseErr::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(strip_and_parse_number::<u64>("  85  "), Ok(85));
        assert_eq!(strip_and_parse_number::<u32>("\n72\r\n"), Ok(72));
    }

    #[test]
    fn fractions_are_not_integers() {
        assert!(strip_and_parse_number::<u64>("85.5").is_err());
    }

    #[test]
    fn negative_numbers_do_not_fit_unsigned() {
        assert!(strip_and_parse_number::<u64>("-1").is_err());
    }

    #[test]
    fn empty_input() {
        assert!(strip_and_parse_number::<u32>("").is_err());
        assert!(strip_and_parse_number::<u32>("   ").is_err());
    }

    #[test]
    fn numeric_arg() {
        assert_eq!(parse_numeric_arg::<u64>(OsStr::new("90")), Ok(90));
        assert_eq!(
            parse_numeric_arg::<u64>(OsStr::new("ninety")),
            Err(ArgParseErr::new())
        );
    }
}
