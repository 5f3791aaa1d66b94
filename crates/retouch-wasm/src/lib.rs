//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editing functions to a browser host.
//!
//! # Module Structure
//!
//! - `types` - `JsRasterBuffer`, the RGBA image handle shared by every binding
//! - `convolve` - Sharpen/emboss kernels, run from a Web Worker
//! - `adjustments` - Filter sliders and the tonal filter stack
//! - `transform` - Rotation and flips
//! - `effects` - Looks, vignette and pixelation
//! - `decode` / `encode` - File import and PNG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, convolve_preset, encode_png } from '@retouch/wasm';
//!
//! await init();
//!
//! const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const sharpened = convolve_preset(image, 'sharpen');
//! const png = encode_png(sharpened);
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod convolve;
mod decode;
mod effects;
mod encode;
mod transform;
mod types;

pub use adjustments::{apply_filters, JsFilterSettings};
pub use convolve::{convolve, convolve_preset, kernel_preset, kernel_preset_names};
pub use decode::{decode_image, get_orientation};
pub use effects::{apply_vignette, look_settings, pixelate};
pub use encode::encode_png;
pub use transform::apply_geometry;
pub use types::JsRasterBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
