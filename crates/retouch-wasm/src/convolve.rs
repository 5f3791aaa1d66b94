//! Convolution WASM bindings.
//!
//! In the browser the concurrency lives on the JS side: the host posts
//! `{ imageData, kernel }` to a Web Worker, which calls [`convolve`] and posts
//! the result back. These bindings are synchronous.
//!
//! # Example
//!
//! ```typescript
//! // worker.ts
//! import init, { JsRasterBuffer, convolve } from '@retouch/wasm';
//!
//! self.onmessage = async ({ data: { imageData, kernel } }) => {
//!   await init();
//!   const src = new JsRasterBuffer(imageData.width, imageData.height, imageData.data);
//!   const out = convolve(src, new Float64Array(kernel));
//!   self.postMessage(new ImageData(new Uint8ClampedArray(out.pixels()), out.width, out.height));
//! };
//! ```

use crate::types::{to_js_error, JsRasterBuffer};
use retouch_core::convolve::{self, Kernel, KernelPreset};
use wasm_bindgen::prelude::*;

/// Convolve an image with a square kernel given as row-major weights.
///
/// The kernel must have an odd side (9 weights for 3x3, 25 for 5x5).
#[wasm_bindgen]
pub fn convolve(image: &JsRasterBuffer, kernel: Vec<f64>) -> Result<JsRasterBuffer, JsValue> {
    let kernel = Kernel::new(kernel).map_err(to_js_error)?;
    Ok(run(image, &kernel))
}

/// Convolve an image with a named preset (`sharpen`, `clarity`, `emboss`).
#[wasm_bindgen]
pub fn convolve_preset(image: &JsRasterBuffer, name: &str) -> Result<JsRasterBuffer, JsValue> {
    let preset: KernelPreset = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(run(image, &preset.kernel()))
}

/// Weights of a named preset, row-major.
#[wasm_bindgen]
pub fn kernel_preset(name: &str) -> Result<Vec<f64>, JsValue> {
    let preset: KernelPreset = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(preset.weights().to_vec())
}

/// Names of every preset, for building a menu.
#[wasm_bindgen]
pub fn kernel_preset_names() -> js_sys::Array {
    KernelPreset::ALL
        .iter()
        .map(|preset| JsValue::from_str(preset.name()))
        .collect()
}

fn run(image: &JsRasterBuffer, kernel: &Kernel) -> JsRasterBuffer {
    JsRasterBuffer::from_core(convolve::convolve(image.as_core(), kernel))
}
