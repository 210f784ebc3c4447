use std::{fmt::Display, str::FromStr};

use strum::{IntoStaticStr, VariantArray};

use crate::{error::InfoError, native::CompressionType};

/// Compression method names accepted by [`Info::set_compression`](crate::Info::set_compression).
#[derive(IntoStaticStr, VariantArray, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Compression {
    #[default]
    Undefined,
    None,
    BZip,
    Fax,
    Group4,
    Jpeg,
    Lzw,
    RunlengthEncoded,
    Zip,
}

impl Display for Compression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

impl FromStr for Compression {
    type Err = InfoError;

    /// Case-insensitive. The empty string means no compression.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "undefined" => Ok(Compression::Undefined),
            "none" | "" => Ok(Compression::None),
            "bzip" => Ok(Compression::BZip),
            "fax" => Ok(Compression::Fax),
            "group4" => Ok(Compression::Group4),
            "jpeg" => Ok(Compression::Jpeg),
            "lzw" => Ok(Compression::Lzw),
            "runlengthencoded" => Ok(Compression::RunlengthEncoded),
            "zip" => Ok(Compression::Zip),
            _ => Err(InfoError::InvalidArgument(s.to_owned())),
        }
    }
}

impl From<Compression> for CompressionType {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Undefined => CompressionType::Undefined,
            Compression::None => CompressionType::None,
            Compression::BZip => CompressionType::BZip,
            Compression::Fax => CompressionType::Fax,
            Compression::Group4 => CompressionType::Group4,
            Compression::Jpeg => CompressionType::Jpeg,
            Compression::Lzw => CompressionType::Lzw,
            Compression::RunlengthEncoded => CompressionType::Rle,
            Compression::Zip => CompressionType::Zip,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_roundtrip_through_display() {
        for variant in Compression::VARIANTS {
            assert_eq!(Compression::from_str(&variant.to_string()), Ok(*variant));
        }
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(Compression::from_str("ZIP"), Ok(Compression::Zip));
        assert_eq!(Compression::from_str("Group4"), Ok(Compression::Group4));
        assert_eq!(
            Compression::from_str("RunLengthEncoded"),
            Ok(Compression::RunlengthEncoded)
        );
    }

    #[test]
    fn empty_means_none() {
        assert_eq!(Compression::from_str(""), Ok(Compression::None));
        assert_eq!(Compression::from_str("NONE"), Ok(Compression::None));
    }

    #[test]
    fn unknown_names_are_rejected_verbatim() {
        assert_eq!(
            Compression::from_str("Bogus"),
            Err(InfoError::InvalidArgument("Bogus".to_owned()))
        );
        // imagemagick knows these, but they are not settable by name here
        assert!(Compression::from_str("losslessjpeg").is_err());
        assert!(Compression::from_str(" zip").is_err());
    }

    #[test]
    fn native_codes_are_distinct() {
        let codes: HashSet<CompressionType> = Compression::VARIANTS
            .iter()
            .map(|c| CompressionType::from(*c))
            .collect();
        assert_eq!(codes.len(), Compression::VARIANTS.len());
    }
}
