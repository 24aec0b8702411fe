//! Storage encoding for profile pictures: JPEG, then standard base64.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::jpeg::JpegEncoder;
use image::ColorType;

use crate::error::EncodeError;

use super::PictureRef;

/// Compress `picture` as JPEG at `quality` (1-100) and base64-encode it.
///
/// JPEG carries no alpha channel, so the image is flattened to RGB first.
pub fn encode_picture(picture: &PictureRef, quality: u8) -> Result<String, EncodeError> {
    if !(1..=100).contains(&quality) {
        return Err(EncodeError::InvalidQuality(quality));
    }

    let rgb = picture.image().to_rgb8();
    let (width, height) = rgb.dimensions();
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(rgb.as_raw(), width, height, ColorType::Rgb8.into())
        .map_err(|e| EncodeError::Jpeg(e.to_string()))?;

    tracing::debug!(
        quality,
        jpeg_bytes = jpeg.len(),
        "Encoded profile picture"
    );
    Ok(STANDARD.encode(jpeg))
}
