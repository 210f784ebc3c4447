use image::{DynamicImage, ImageFormat};

/// A decoded image along with the metadata that has to survive re-encoding
#[derive(Debug, Clone)]
pub struct Image {
    /// Format the image was decoded from, if known
    pub format: Option<ImageFormat>,
    pub icc: Option<Vec<u8>>,
    pub pixels: DynamicImage,
}

impl Image {
    pub fn new(pixels: DynamicImage) -> Self {
        Self {
            format: None,
            icc: None,
            pixels,
        }
    }
}
