//! PNG encoding for export.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use thiserror::Error;

use crate::buffer::RasterBuffer;

/// File name used when the caller does not pick one.
pub const DEFAULT_EXPORT_NAME: &str = "edited-image.png";

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGBA buffer to PNG bytes.
///
/// The buffer's dimensions and pixel length are validated at construction,
/// so failures here only come from the encoder itself.
pub fn encode_png(buffer: &RasterBuffer) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::with_capacity(buffer.byte_size() / 2);
    PngEncoder::new(&mut out)
        .write_image(
            buffer.data(),
            buffer.width(),
            buffer.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    tracing::debug!(
        width = buffer.width(),
        height = buffer.height(),
        bytes = out.len(),
        "encoded png"
    );
    Ok(out)
}
