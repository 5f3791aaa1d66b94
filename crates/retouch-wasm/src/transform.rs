//! WASM bindings for rotation and flips.

use crate::types::JsRasterBuffer;
use retouch_core::transform::{self, Geometry};
use wasm_bindgen::prelude::*;

/// Flip, then rotate an image clockwise.
///
/// `rotation` is in degrees and snaps to the nearest quarter turn. Quarter
/// and three-quarter turns swap width and height.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Rotate right once, mirrored
/// const out = apply_geometry(sourceImage, 90, true, false);
/// ```
#[wasm_bindgen]
pub fn apply_geometry(
    image: &JsRasterBuffer,
    rotation: i32,
    flip_horizontal: bool,
    flip_vertical: bool,
) -> JsRasterBuffer {
    let geometry = Geometry {
        rotation,
        flip_horizontal,
        flip_vertical,
    };
    JsRasterBuffer::from_core(transform::apply_geometry(image.as_core(), &geometry))
}
