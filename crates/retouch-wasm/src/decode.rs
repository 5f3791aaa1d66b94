//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::{to_js_error, JsRasterBuffer};
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG file to RGBA, applying EXIF orientation.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterBuffer::from_core)
        .map_err(to_js_error)
}

/// EXIF orientation tag value (1-8) of an encoded image; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_of_garbage_is_normal() {
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), 1);
    }
}
