//! Retouch Core - image editing library
//!
//! This crate provides the pixel work behind the Retouch editor: the
//! convolution engine for sharpen/emboss kernels, the tonal filter stack,
//! geometry, looks, and PNG import/export.

pub mod adjustments;
pub mod buffer;
pub mod convolve;
pub mod decode;
pub mod effects;
pub mod encode;
pub mod session;
pub mod transform;

pub use adjustments::apply_filters;
pub use buffer::{InputError, RasterBuffer};
pub use convolve::{convolve, ConvolutionRequest, ConvolveError, Kernel, KernelPreset};
pub use effects::Look;
pub use session::{EditSession, SessionError};
pub use transform::{apply_geometry, Geometry};

#[cfg(not(target_arch = "wasm32"))]
pub use convolve::engine::ConvolutionEngine;

/// Tonal slider state, in the editor's UI units.
///
/// Brightness and contrast are offsets from 100%, so the neutral value of
/// every offset slider is 0. Saturate and opacity are plain percentages and
/// default to 100.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// Brightness offset (-100 to 100)
    pub brightness: f32,
    /// Contrast offset (-100 to 100)
    pub contrast: f32,
    /// Grayscale amount (0 to 100)
    pub grayscale: f32,
    /// Gaussian blur standard deviation in pixels (0 to 10)
    pub blur: f32,
    /// Saturation (0 to 200)
    pub saturate: f32,
    /// Hue rotation in degrees (0 to 360)
    pub hue_rotate: f32,
    /// Invert amount (0 to 100)
    pub invert: f32,
    /// Sepia amount (0 to 100)
    pub sepia: f32,
    /// Opacity (0 to 100)
    pub opacity: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 0.0,
            grayscale: 0.0,
            blur: 0.0,
            saturate: 100.0,
            hue_rotate: 0.0,
            invert: 0.0,
            sepia: 0.0,
            opacity: 100.0,
        }
    }
}

impl FilterSettings {
    /// Create a new FilterSettings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Render the settings as a CSS `filter` property value.
    pub fn to_css_filter(&self) -> String {
        format!(
            "brightness({}%) contrast({}%) grayscale({}%) blur({}px) saturate({}%) \
             hue-rotate({}deg) invert({}%) sepia({}%) opacity({}%)",
            100.0 + self.brightness,
            100.0 + self.contrast,
            self.grayscale,
            self.blur,
            self.saturate,
            self.hue_rotate,
            self.invert,
            self.sepia,
            self.opacity,
        )
    }
}
