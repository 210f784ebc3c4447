use std::{ffi::OsStr, fmt::Display, str::FromStr};

use crate::{arg_parse_err::ArgParseErr, arg_parsers::numbers::strip_and_parse_number};

/// Horizontal and vertical resolution, written as `WxH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Density {
    pub x: u32,
    pub y: u32,
}

impl Density {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Reads back the `WxH` text written by `Display`.
    /// Unlike `FromStr` this does not validate, so zero axes survive.
    pub(crate) fn from_text(text: &str) -> Option<Self> {
        let (x, y) = text.split_once('x')?;
        Some(Self::new(x.parse().ok()?, y.parse().ok()?))
    }
}

impl Display for Density {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

impl TryFrom<&OsStr> for Density {
    type Error = ArgParseErr;

    fn try_from(value: &OsStr) -> Result<Self, Self::Error> {
        value
            .to_str()
            .ok_or_else(ArgParseErr::new)
            .and_then(FromStr::from_str)
    }
}

impl FromStr for Density {
    type Err = ArgParseErr;

    /// Accepts `WxH`, or a single number that applies to both axes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let axis = |text: &str| -> Result<u32, ArgParseErr> {
            match strip_and_parse_number::<u32>(text)? {
                0 => Err(ArgParseErr::with_msg("density must be positive")),
                n => Ok(n),
            }
        };
        match s.split_once('x') {
            Some((x, y)) => Ok(Density::new(axis(x)?, axis(y)?)),
            None => {
                let both = axis(s)?;
                Ok(Density::new(both, both))
            }
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Density {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        Density::new(u32::arbitrary(g).max(1), u32::arbitrary(g).max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use quickcheck_macros::quickcheck;

    #[test]
    fn both_axes() {
        assert_eq!(Density::from_str("72x144"), Ok(Density::new(72, 144)));
    }

    #[test]
    fn single_number() {
        assert_eq!(Density::from_str("300"), Ok(Density::new(300, 300)));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Density::from_str("").is_err());
        assert!(Density::from_str("ax5").is_err());
        assert!(Density::from_str("5x").is_err());
        assert!(Density::from_str("-5x5").is_err());
        assert!(Density::from_str("72.5x72").is_err());
        assert!(Density::from_str("5x5x5").is_err());
    }

    #[test]
    fn rejects_zero() {
        assert_eq!(
            Density::from_str("0x5"),
            Err(ArgParseErr::with_msg("density must be positive"))
        );
    }

    #[quickcheck]
    fn roundtrip_is_lossless(orig: Density) {
        assert_eq!(Density::from_str(&orig.to_string()), Ok(orig));
    }
}
