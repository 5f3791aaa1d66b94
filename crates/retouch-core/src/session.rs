//! Edit session: the image being edited plus its slider and geometry state.
//!
//! Filters and geometry are non-destructive; they are re-applied to the base
//! pixels on every [`render`](EditSession::render). Kernels, the lomo
//! vignette and pixelation are destructive: their output is
//! [installed](EditSession::install) as the new base, which bakes in (and
//! therefore resets) the current filters and geometry.

use thiserror::Error;
use tracing::{debug, info};

use crate::adjustments::apply_filters;
use crate::buffer::{InputError, RasterBuffer};
use crate::convolve::{ConvolutionRequest, ConvolveError, Kernel};
use crate::decode::{decode_image, DecodeError};
use crate::effects::{self, Look};
use crate::encode::{encode_png, EncodeError};
use crate::transform::{apply_geometry, Geometry};
use crate::FilterSettings;

#[cfg(not(target_arch = "wasm32"))]
use crate::convolve::engine::ConvolutionEngine;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Convolve(#[from] ConvolveError),

    #[error("Failed to load image: {0}")]
    Decode(#[from] DecodeError),

    #[error("Failed to export image: {0}")]
    Encode(#[from] EncodeError),
}

/// One open image and its edit state.
#[derive(Debug, Clone)]
pub struct EditSession {
    base: RasterBuffer,
    filters: FilterSettings,
    geometry: Geometry,
}

impl EditSession {
    pub fn new(base: RasterBuffer) -> Self {
        Self {
            base,
            filters: FilterSettings::default(),
            geometry: Geometry::default(),
        }
    }

    /// Open an encoded image file.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self, SessionError> {
        let base = decode_image(bytes)?;
        info!(
            width = base.width(),
            height = base.height(),
            "opened image"
        );
        Ok(Self::new(base))
    }

    /// Base pixels, before filters and geometry.
    pub fn base(&self) -> &RasterBuffer {
        &self.base
    }

    pub fn filters(&self) -> &FilterSettings {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSettings {
        &mut self.filters
    }

    pub fn set_filters(&mut self, filters: FilterSettings) {
        self.filters = filters;
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn geometry_mut(&mut self) -> &mut Geometry {
        &mut self.geometry
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterSettings::default();
    }

    /// Reset filters and geometry. Destructive edits already installed are
    /// kept.
    pub fn reset_all(&mut self) {
        self.reset_filters();
        self.geometry.reset();
    }

    /// Dimensions of the rendered image.
    pub fn output_dimensions(&self) -> (u32, u32) {
        self.geometry
            .output_dimensions(self.base.width(), self.base.height())
    }

    /// Rasterize the current state: geometry first, then the filter stack.
    pub fn render(&self) -> RasterBuffer {
        let transformed = apply_geometry(&self.base, &self.geometry);
        apply_filters(&transformed, &self.filters)
    }

    /// CSS `filter` value a browser host previews the settings with.
    pub fn css_filter(&self) -> String {
        self.filters.to_css_filter()
    }

    /// Apply a one-click look.
    pub fn apply_look(&mut self, look: Look) -> Result<(), SessionError> {
        debug!(%look, "applying look");
        self.filters = look.filter_settings();
        if look.is_destructive() {
            let framed = effects::apply_vignette(&self.render());
            self.install(framed)?;
        }
        Ok(())
    }

    /// Pixelate the rendered image into `block_size` blocks and install it.
    pub fn pixelate(&mut self, block_size: u32) -> Result<(), SessionError> {
        let blocks = effects::pixelate(&self.render(), block_size);
        self.install(blocks)
    }

    /// Snapshot the rendered pixels into a request for the engine.
    pub fn convolution_request(&self, kernel: impl Into<Kernel>) -> ConvolutionRequest {
        ConvolutionRequest::new(self.render(), kernel)
    }

    /// Replace the base pixels with an engine response.
    ///
    /// The response must have the rendered dimensions. Filters and geometry
    /// are reset since they are now part of the pixels.
    pub fn install(&mut self, buffer: RasterBuffer) -> Result<(), SessionError> {
        let expected = self.output_dimensions();
        if buffer.dimensions() != expected {
            return Err(InputError::DimensionMismatch {
                expected,
                actual: buffer.dimensions(),
            }
            .into());
        }

        self.base = buffer;
        self.reset_all();
        debug!(width = expected.0, height = expected.1, "installed pixels");
        Ok(())
    }

    /// Run `kernel` over the rendered image on `engine` and install the
    /// result.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn apply_kernel(
        &mut self,
        engine: &ConvolutionEngine,
        kernel: impl Into<Kernel>,
    ) -> Result<(), SessionError> {
        let request = self.convolution_request(kernel);
        let result = engine.submit(request).await?;
        self.install(result)
    }

    /// Encode the rendered image as PNG.
    pub fn export_png(&self) -> Result<Vec<u8>, SessionError> {
        Ok(encode_png(&self.render())?)
    }
}
