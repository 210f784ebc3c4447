use std::{ffi::OsStr, fmt::Display, str::FromStr};

use strum::{IntoStaticStr, VariantArray};

use crate::{arg_parse_err::ArgParseErr, native::ColorspaceType};

/// Colorspace to encode in.
///
/// Converts one-to-one to and from the library's [`ColorspaceType`] without any validation.
/// Not every colorspace can be encoded; that is decided by the encoder, see
/// [`Colorspace::color_model`].
#[derive(IntoStaticStr, VariantArray, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Colorspace {
    #[default]
    Undefined,
    #[strum(serialize = "RGB")]
    Rgb,
    Gray,
    Transparent,
    #[strum(serialize = "OHTA")]
    Ohta,
    #[strum(serialize = "XYZ")]
    Xyz,
    #[strum(serialize = "YCC")]
    Ycc,
    #[strum(serialize = "YIQ")]
    Yiq,
    YPbPr,
    #[strum(serialize = "YUV")]
    Yuv,
    #[strum(serialize = "CMYK")]
    Cmyk,
    #[strum(serialize = "sRGB")]
    Srgb,
    #[strum(serialize = "HSL")]
    Hsl,
    #[strum(serialize = "HWB")]
    Hwb,
    #[strum(serialize = "Lab")]
    Lab,
    #[strum(serialize = "Log")]
    CineonLogRgb,
    Rec601Luma,
    Rec601YCbCr,
    Rec709Luma,
    Rec709YCbCr,
}

/// How the pixels have to be stored to be encoded in a given colorspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    Luma,
    Rgb,
}

impl Colorspace {
    /// `None` means the encoders cannot produce this colorspace.
    pub fn color_model(&self) -> Option<ColorModel> {
        match self {
            Colorspace::Undefined
            | Colorspace::Rgb
            | Colorspace::Srgb
            | Colorspace::Transparent => Some(ColorModel::Rgb),
            Colorspace::Gray | Colorspace::Rec601Luma | Colorspace::Rec709Luma => {
                Some(ColorModel::Luma)
            }
            _ => None,
        }
    }
}

impl Display for Colorspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

impl TryFrom<&OsStr> for Colorspace {
    type Error = ArgParseErr;

    fn try_from(value: &OsStr) -> Result<Self, Self::Error> {
        value
            .to_str()
            .ok_or_else(ArgParseErr::new)
            .and_then(FromStr::from_str)
    }
}

impl FromStr for Colorspace {
    type Err = ArgParseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // <https://imagemagick.org/script/command-line-options.php#colorspace>
        match s.to_lowercase().as_str() {
            "undefined" => Ok(Colorspace::Undefined),
            "rgb" => Ok(Colorspace::Rgb),
            "gray" => Ok(Colorspace::Gray),
            "transparent" => Ok(Colorspace::Transparent),
            "ohta" => Ok(Colorspace::Ohta),
            "xyz" => Ok(Colorspace::Xyz),
            "ycc" => Ok(Colorspace::Ycc),
            "yiq" => Ok(Colorspace::Yiq),
            "ypbpr" => Ok(Colorspace::YPbPr),
            "yuv" => Ok(Colorspace::Yuv),
            "cmyk" => Ok(Colorspace::Cmyk),
            "srgb" => Ok(Colorspace::Srgb),
            "hsl" => Ok(Colorspace::Hsl),
            "hwb" => Ok(Colorspace::Hwb),
            "lab" => Ok(Colorspace::Lab),
            "log" | "cineonlog" => Ok(Colorspace::CineonLogRgb),
            "rec601luma" => Ok(Colorspace::Rec601Luma),
            "rec601ycbcr" => Ok(Colorspace::Rec601YCbCr),
            "rec709luma" => Ok(Colorspace::Rec709Luma),
            "rec709ycbcr" => Ok(Colorspace::Rec709YCbCr),
            _ => Err(ArgParseErr::with_msg(format!(
                "unsupported colorspace `{}`",
                s
            ))),
        }
    }
}

impl From<Colorspace> for ColorspaceType {
    fn from(value: Colorspace) -> Self {
        match value {
            Colorspace::Undefined => ColorspaceType::Undefined,
            Colorspace::Rgb => ColorspaceType::Rgb,
            Colorspace::Gray => ColorspaceType::Gray,
            Colorspace::Transparent => ColorspaceType::Transparent,
            Colorspace::Ohta => ColorspaceType::Ohta,
            Colorspace::Xyz => ColorspaceType::Xyz,
            Colorspace::Ycc => ColorspaceType::Ycc,
            Colorspace::Yiq => ColorspaceType::Yiq,
            Colorspace::YPbPr => ColorspaceType::YPbPr,
            Colorspace::Yuv => ColorspaceType::Yuv,
            Colorspace::Cmyk => ColorspaceType::Cmyk,
            Colorspace::Srgb => ColorspaceType::Srgb,
            Colorspace::Hsl => ColorspaceType::Hsl,
            Colorspace::Hwb => ColorspaceType::Hwb,
            Colorspace::Lab => ColorspaceType::Lab,
            Colorspace::CineonLogRgb => ColorspaceType::CineonLogRgb,
            Colorspace::Rec601Luma => ColorspaceType::Rec601Luma,
            Colorspace::Rec601YCbCr => ColorspaceType::Rec601YCbCr,
            Colorspace::Rec709Luma => ColorspaceType::Rec709Luma,
            Colorspace::Rec709YCbCr => ColorspaceType::Rec709YCbCr,
        }
    }
}

impl From<ColorspaceType> for Colorspace {
    fn from(value: ColorspaceType) -> Self {
        match value {
            ColorspaceType::Undefined => Colorspace::Undefined,
            ColorspaceType::Rgb => Colorspace::Rgb,
            ColorspaceType::Gray => Colorspace::Gray,
            ColorspaceType::Transparent => Colorspace::Transparent,
            ColorspaceType::Ohta => Colorspace::Ohta,
            ColorspaceType::Xyz => Colorspace::Xyz,
            ColorspaceType::Ycc => Colorspace::Ycc,
            ColorspaceType::Yiq => Colorspace::Yiq,
            ColorspaceType::YPbPr => Colorspace::YPbPr,
            ColorspaceType::Yuv => Colorspace::Yuv,
            ColorspaceType::Cmyk => Colorspace::Cmyk,
            ColorspaceType::Srgb => Colorspace::Srgb,
            ColorspaceType::Hsl => Colorspace::Hsl,
            ColorspaceType::Hwb => Colorspace::Hwb,
            ColorspaceType::Lab => Colorspace::Lab,
            ColorspaceType::CineonLogRgb => Colorspace::CineonLogRgb,
            ColorspaceType::Rec601Luma => Colorspace::Rec601Luma,
            ColorspaceType::Rec601YCbCr => Colorspace::Rec601YCbCr,
            ColorspaceType::Rec709Luma => Colorspace::Rec709Luma,
            ColorspaceType::Rec709YCbCr => Colorspace::Rec709YCbCr,
        }
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Colorspace {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(Colorspace::VARIANTS).unwrap()
    }
}
