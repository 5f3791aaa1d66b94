//! Tonal filter WASM bindings.
//!
//! [`JsFilterSettings`] mirrors the editor's slider panel. The host can
//! either preview the settings with a CSS `filter` string
//! ([`JsFilterSettings::css_filter`]) or bake them into pixels with
//! [`apply_filters`].

use crate::types::{to_js_error, JsRasterBuffer};
use retouch_core::{adjustments, FilterSettings};
use wasm_bindgen::prelude::*;

/// Filter slider state for JavaScript
#[wasm_bindgen]
pub struct JsFilterSettings {
    inner: FilterSettings,
}

#[wasm_bindgen]
impl JsFilterSettings {
    /// Create new settings with every slider at its neutral value
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: FilterSettings::new(),
        }
    }

    /// Brightness offset (-100 to 100)
    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f32 {
        self.inner.brightness
    }

    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f32) {
        self.inner.brightness = value;
    }

    /// Contrast offset (-100 to 100)
    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f32 {
        self.inner.contrast
    }

    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f32) {
        self.inner.contrast = value;
    }

    /// Grayscale amount (0 to 100)
    #[wasm_bindgen(getter)]
    pub fn grayscale(&self) -> f32 {
        self.inner.grayscale
    }

    #[wasm_bindgen(setter)]
    pub fn set_grayscale(&mut self, value: f32) {
        self.inner.grayscale = value;
    }

    /// Blur radius in pixels (0 to 10)
    #[wasm_bindgen(getter)]
    pub fn blur(&self) -> f32 {
        self.inner.blur
    }

    #[wasm_bindgen(setter)]
    pub fn set_blur(&mut self, value: f32) {
        self.inner.blur = value;
    }

    /// Saturation percent (0 to 200)
    #[wasm_bindgen(getter)]
    pub fn saturate(&self) -> f32 {
        self.inner.saturate
    }

    #[wasm_bindgen(setter)]
    pub fn set_saturate(&mut self, value: f32) {
        self.inner.saturate = value;
    }

    /// Hue rotation in degrees (0 to 360)
    #[wasm_bindgen(getter)]
    pub fn hue_rotate(&self) -> f32 {
        self.inner.hue_rotate
    }

    #[wasm_bindgen(setter)]
    pub fn set_hue_rotate(&mut self, value: f32) {
        self.inner.hue_rotate = value;
    }

    /// Invert amount (0 to 100)
    #[wasm_bindgen(getter)]
    pub fn invert(&self) -> f32 {
        self.inner.invert
    }

    #[wasm_bindgen(setter)]
    pub fn set_invert(&mut self, value: f32) {
        self.inner.invert = value;
    }

    /// Sepia amount (0 to 100)
    #[wasm_bindgen(getter)]
    pub fn sepia(&self) -> f32 {
        self.inner.sepia
    }

    #[wasm_bindgen(setter)]
    pub fn set_sepia(&mut self, value: f32) {
        self.inner.sepia = value;
    }

    /// Opacity percent (0 to 100)
    #[wasm_bindgen(getter)]
    pub fn opacity(&self) -> f32 {
        self.inner.opacity
    }

    #[wasm_bindgen(setter)]
    pub fn set_opacity(&mut self, value: f32) {
        self.inner.opacity = value;
    }

    /// Check if all sliders are at their neutral values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Move every slider back to its neutral value
    pub fn reset(&mut self) {
        self.inner = FilterSettings::default();
    }

    /// CSS `filter` property value for previewing on a canvas or `<img>`
    pub fn css_filter(&self) -> String {
        self.inner.to_css_filter()
    }

    /// Serialize to a plain JS object for storage
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(to_js_error)
    }

    /// Deserialize from a plain JS object. Missing keys keep their defaults.
    pub fn from_json(value: JsValue) -> Result<JsFilterSettings, JsValue> {
        let inner: FilterSettings = serde_wasm_bindgen::from_value(value).map_err(to_js_error)?;
        Ok(Self { inner })
    }
}

impl Default for JsFilterSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl JsFilterSettings {
    pub(crate) fn from_core(inner: FilterSettings) -> Self {
        Self { inner }
    }

    pub(crate) fn inner(&self) -> &FilterSettings {
        &self.inner
    }
}

/// Bake the filter stack into a new image.
///
/// # Example (TypeScript)
/// ```typescript
/// const settings = new JsFilterSettings();
/// settings.brightness = 20;  // brightness(120%)
/// settings.sepia = 50;
///
/// const filtered = apply_filters(sourceImage, settings);
/// ```
#[wasm_bindgen]
pub fn apply_filters(image: &JsRasterBuffer, settings: &JsFilterSettings) -> JsRasterBuffer {
    JsRasterBuffer::from_core(adjustments::apply_filters(image.as_core(), settings.inner()))
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_json_round_trip() {
        let mut settings = JsFilterSettings::new();
        settings.set_hue_rotate(90.0);
        let json = settings.to_json().unwrap();
        let restored = JsFilterSettings::from_json(json).unwrap();
        assert_eq!(restored.hue_rotate(), 90.0);
        assert_eq!(restored.saturate(), 100.0);
    }
}
