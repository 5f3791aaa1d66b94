//! The RGBA raster buffer shared by every stage of the editor.
//!
//! A [`RasterBuffer`] is a `width × height` grid of RGBA8 pixels stored
//! row-major with interleaved channels. The constructor enforces the length
//! invariant so downstream code can index without re-validating.

use thiserror::Error;

/// Number of interleaved channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// Rejections for malformed buffers and kernels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Kernel length is not the square of an odd side
    #[error("Invalid kernel: {len} weights do not form an odd-sided square")]
    InvalidKernel { len: usize },

    /// A result buffer does not have the size it was requested at
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// An RGBA8 image held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuffer {
    /// Wrap interleaved RGBA bytes.
    ///
    /// Fails if either dimension is zero or `data.len() != width * height * 4`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, InputError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(InputError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer where every pixel has the same RGBA value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, InputError> {
        let len = expected_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a buffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Result<Self, InputError> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Wrap the output of an `image::imageops` call on a non-empty image.
    pub(crate) fn from_image_output(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        debug_assert!(width > 0 && height > 0, "imageops produced an empty image");
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Convert into an `image::RgbaImage` for use with `image::imageops`.
    pub fn into_rgba_image(self) -> image::RgbaImage {
        let (width, height) = (self.width, self.height);
        image::RgbaImage::from_raw(width, height, self.data)
            .unwrap_or_else(|| image::RgbaImage::new(width, height))
    }

    /// Borrow as an `image::RgbaImage` copy.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        self.clone().into_rgba_image()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Interleaved RGBA bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the pixel bytes. The length cannot change.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// A buffer of the same dimensions holding `data`.
    ///
    /// For in-crate operations that produce exactly `byte_size()` bytes.
    pub(crate) fn with_data(&self, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), self.data.len(), "Pixel buffer size mismatch");
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Give up ownership of the pixel bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// RGBA value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
    }
}

fn expected_len(width: u32, height: u32) -> Result<usize, InputError> {
    if width == 0 || height == 0 {
        return Err(InputError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(InputError::InvalidDimensions { width, height })
}
