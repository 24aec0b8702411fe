//! Picker that loads a picture from a file on disk.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::PickError;

use super::{ImagePicker, PickOutcome, PictureRef};

/// Loads the image at a fixed path. An empty path means the user cancelled.
pub struct FilePicker {
    path: PathBuf,
}

impl FilePicker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ImagePicker for FilePicker {
    async fn pick(&self) -> Result<PickOutcome, PickError> {
        if self.path.as_os_str().is_empty() {
            return Ok(PickOutcome::Cancelled);
        }

        let bytes = tokio::fs::read(&self.path).await.map_err(|e| PickError::Read {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let picture = PictureRef::from_bytes(&bytes)?;
        tracing::debug!(
            path = %self.path.display(),
            dimensions = ?picture.dimensions(),
            "Picture loaded from file"
        );
        Ok(PickOutcome::Selected(picture))
    }
}
