//! Request and error types for the convolution engine.

use thiserror::Error;

use super::kernel::Kernel;
use crate::buffer::{InputError, RasterBuffer};

/// Errors reported by the convolution engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvolveError {
    /// Malformed kernel or buffer, rejected before any pixel is touched.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The worker stopped or crashed before replying.
    #[error("Convolution engine unavailable: {0}")]
    EngineUnavailable(String),
}

/// One buffer plus the kernel to run over it.
///
/// Ownership of the buffer moves into the request; the engine hands back a
/// new buffer of the same dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionRequest {
    pub buffer: RasterBuffer,
    pub kernel: Kernel,
}

impl ConvolutionRequest {
    pub fn new(buffer: RasterBuffer, kernel: impl Into<Kernel>) -> Self {
        Self {
            buffer,
            kernel: kernel.into(),
        }
    }

    /// Validate untyped host data into a request.
    ///
    /// This is the message boundary used by hosts that hold plain arrays
    /// (e.g. a browser `ImageData` and a JS number array).
    pub fn from_raw(
        width: u32,
        height: u32,
        data: Vec<u8>,
        weights: Vec<f64>,
    ) -> Result<Self, ConvolveError> {
        let kernel = Kernel::new(weights)?;
        let buffer = RasterBuffer::new(width, height, data)?;
        Ok(Self { buffer, kernel })
    }

    /// Run the request on the current thread.
    pub fn run(self) -> RasterBuffer {
        super::convolve(&self.buffer, &self.kernel)
    }
}
