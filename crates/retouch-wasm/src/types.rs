//! WASM-compatible wrapper types for image data.
//!
//! JavaScript hands pixels over as the `data` array of an `ImageData`
//! (RGBA, 4 bytes per pixel). The wrapper validates it once on the way in.

use std::fmt::Display;

use retouch_core::RasterBuffer;
use wasm_bindgen::prelude::*;

/// An RGBA image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. Keep images in WASM memory across
/// chained calls and only extract pixels to draw them.
#[wasm_bindgen]
pub struct JsRasterBuffer {
    inner: RasterBuffer,
}

#[wasm_bindgen]
impl JsRasterBuffer {
    /// Wrap RGBA pixel data (4 bytes per pixel, row-major order).
    ///
    /// Fails if either dimension is zero or the length is not
    /// `width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterBuffer, JsValue> {
        RasterBuffer::new(width, height, pixels)
            .map(Self::from_core)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// Returns RGBA pixel data as Uint8Array, ready for `new ImageData(...)`.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.data().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsRasterBuffer {
    pub(crate) fn from_core(inner: RasterBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &RasterBuffer {
        &self.inner
    }
}

/// Convert a core error into the string value thrown on the JS side.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
