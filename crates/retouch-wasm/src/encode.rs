//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png } from '@retouch/wasm';
//!
//! const png = encode_png(edited);
//! const link = document.createElement('a');
//! link.download = 'edited-image.png';
//! link.href = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! link.click();
//! ```

use crate::types::{to_js_error, JsRasterBuffer};
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image as lossless PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsRasterBuffer) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.as_core()).map_err(to_js_error)
}
