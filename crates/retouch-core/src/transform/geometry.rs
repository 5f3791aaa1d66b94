//! Rotation and flip state, and its application to a buffer.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::buffer::RasterBuffer;

/// Orientation edits made with the rotate/flip buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// Clockwise rotation in degrees (multiple of 90, kept in 0..360)
    pub rotation: i32,
    /// Mirror left-to-right
    pub flip_horizontal: bool,
    /// Mirror top-to-bottom
    pub flip_vertical: bool,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if no rotation or flip is applied
    pub fn is_identity(&self) -> bool {
        self.quarter_turns() == 0 && !self.flip_horizontal && !self.flip_vertical
    }

    /// Rotate 90° counter-clockwise.
    pub fn rotate_left(&mut self) {
        self.rotation = (self.rotation.rem_euclid(360) + 270) % 360;
    }

    /// Rotate 90° clockwise.
    pub fn rotate_right(&mut self) {
        self.rotation = (self.rotation.rem_euclid(360) + 90) % 360;
    }

    pub fn toggle_flip_horizontal(&mut self) {
        self.flip_horizontal = !self.flip_horizontal;
    }

    pub fn toggle_flip_vertical(&mut self) {
        self.flip_vertical = !self.flip_vertical;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of clockwise quarter turns (0-3).
    ///
    /// Angles that are not multiples of 90 snap to the nearest quarter turn.
    pub fn quarter_turns(&self) -> u8 {
        (((self.rotation.rem_euclid(360) + 45) / 90) % 4) as u8
    }

    /// Returns true if the rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(&self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Dimensions of a `width × height` image after this geometry.
    pub fn output_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Apply flips and rotation to `buffer`.
///
/// # Example
///
/// ```ignore
/// use retouch_core::transform::{apply_geometry, Geometry};
///
/// let mut geometry = Geometry::new();
/// geometry.rotate_right();
/// let rotated = apply_geometry(&image, &geometry);
/// assert_eq!(rotated.dimensions(), (image.height(), image.width()));
/// ```
pub fn apply_geometry(buffer: &RasterBuffer, geometry: &Geometry) -> RasterBuffer {
    // Fast path: nothing to do
    if geometry.is_identity() {
        return buffer.clone();
    }

    let mut img = buffer.to_rgba_image();
    if geometry.flip_horizontal {
        imageops::flip_horizontal_in_place(&mut img);
    }
    if geometry.flip_vertical {
        imageops::flip_vertical_in_place(&mut img);
    }

    let img = match geometry.quarter_turns() {
        1 => imageops::rotate90(&img),
        2 => imageops::rotate180(&img),
        3 => imageops::rotate270(&img),
        _ => img,
    };

    RasterBuffer::from_image_output(img)
}
