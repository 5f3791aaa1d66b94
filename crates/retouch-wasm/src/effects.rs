//! Look and effect WASM bindings.

use crate::adjustments::JsFilterSettings;
use crate::types::JsRasterBuffer;
use retouch_core::effects::{self, Look};
use wasm_bindgen::prelude::*;

/// Filter settings a look starts from (`vintage`, `lomo`).
///
/// The lomo look also needs [`apply_vignette`] on the rendered pixels.
#[wasm_bindgen]
pub fn look_settings(name: &str) -> Result<JsFilterSettings, JsValue> {
    let look: Look = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(JsFilterSettings::from_core(look.filter_settings()))
}

/// Darken the edges with the lomo radial vignette.
#[wasm_bindgen]
pub fn apply_vignette(image: &JsRasterBuffer) -> JsRasterBuffer {
    JsRasterBuffer::from_core(effects::apply_vignette(image.as_core()))
}

/// Pixelate into square blocks. A `block_size` of 0 uses the editor default.
#[wasm_bindgen]
pub fn pixelate(image: &JsRasterBuffer, block_size: u32) -> JsRasterBuffer {
    let block_size = if block_size == 0 {
        effects::DEFAULT_BLOCK_SIZE
    } else {
        block_size
    };
    JsRasterBuffer::from_core(effects::pixelate(image.as_core(), block_size))
}
