//! Format-sniffing decode with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, Orientation};
use crate::buffer::RasterBuffer;

/// Decode an encoded image, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format is not recognized,
/// `DecodeError::CorruptedFile` if decoding fails part-way, and
/// `DecodeError::EmptyImage` if the image has a zero dimension.
pub fn decode_image(bytes: &[u8]) -> Result<RasterBuffer, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_image(bytes)?;
    into_buffer(apply_orientation(img, orientation))
}

/// Decode an encoded image without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<RasterBuffer, DecodeError> {
    into_buffer(read_image(bytes)?)
}

/// Extract the EXIF orientation of an encoded image.
///
/// Returns `Orientation::Normal` when there is no EXIF data.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_image(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode()?;
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(img)
}

fn into_buffer(img: DynamicImage) -> Result<RasterBuffer, DecodeError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    RasterBuffer::from_rgba_image(img.into_rgba8())
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
