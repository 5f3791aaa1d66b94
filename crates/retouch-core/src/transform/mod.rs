//! Geometric transforms: quarter-turn rotation and mirroring.
//!
//! # Transform Order
//!
//! The host draws the image through a canvas transform of `rotate` followed
//! by `scale(±1, ±1)`. Applied to image coordinates that means:
//! 1. Horizontal / vertical flip
//! 2. Rotation (clockwise, multiples of 90°)
//!
//! Tonal filters are applied to the transformed pixels afterwards.

mod geometry;

pub use geometry::{apply_geometry, Geometry};
