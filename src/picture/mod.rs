//! Profile pictures: the image-acquisition seam and the storage encoding.

pub mod encode;
pub mod file_picker;

use async_trait::async_trait;
use image::{DynamicImage, GenericImageView};

use crate::error::PickError;

pub use encode::encode_picture;
pub use file_picker::FilePicker;

/// Opaque handle to a selected, decoded picture.
#[derive(Clone)]
pub struct PictureRef {
    image: DynamicImage,
}

impl PictureRef {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    /// Decode a picture from encoded bytes (PNG or JPEG).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PickError> {
        let image =
            image::load_from_memory(bytes).map_err(|e| PickError::Decode(e.to_string()))?;
        Ok(Self { image })
    }

    /// (width, height) in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

impl std::fmt::Debug for PictureRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (width, height) = self.dimensions();
        f.debug_struct("PictureRef")
            .field("width", &width)
            .field("height", &height)
            .field("color", &self.image.color())
            .finish()
    }
}

/// Result of asking the user for a picture.
#[derive(Debug, Clone)]
pub enum PickOutcome {
    Selected(PictureRef),
    /// The user dismissed the picker; nothing changes.
    Cancelled,
}

/// Image-acquisition collaborator (photo library, camera, file dialog).
#[async_trait]
pub trait ImagePicker: Send + Sync {
    async fn pick(&self) -> Result<PickOutcome, PickError>;
}
