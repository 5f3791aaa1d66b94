//! Radial vignette used by the lomo look.
//!
//! The gradient is centered on the image. It is fully transparent inside
//! `width / 3`, ramps linearly to black at 60% alpha at `width / 1.5`, and
//! stays at 60% beyond that. It is composited source-over onto the pixels.

use crate::buffer::{RasterBuffer, CHANNELS};

/// Alpha of the gradient's outer stop.
const OUTER_ALPHA: f32 = 0.6;

/// Darken the edges of `buffer` with the lomo vignette.
///
/// # Example
///
/// ```ignore
/// let framed = apply_vignette(&image);
/// // Center pixels are untouched, corners are darker
/// ```
pub fn apply_vignette(buffer: &RasterBuffer) -> RasterBuffer {
    let (width, height) = buffer.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let inner = width as f32 / 3.0;
    let outer = width as f32 / 1.5;

    let mut out = buffer.clone();
    for (idx, chunk) in out.data_mut().chunks_exact_mut(CHANNELS).enumerate() {
        let px = (idx as u32 % width) as f32 + 0.5;
        let py = (idx as u32 / width) as f32 + 0.5;
        let distance = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();

        let a = gradient_alpha(distance, inner, outer);
        if a <= 0.0 {
            continue;
        }

        // Black source-over on straight (non-premultiplied) alpha
        let dst_alpha = chunk[3] as f32 / 255.0;
        let out_alpha = a + dst_alpha * (1.0 - a);
        let keep = dst_alpha * (1.0 - a) / out_alpha;
        for c in chunk.iter_mut().take(3) {
            *c = (*c as f32 * keep).round() as u8;
        }
        chunk[3] = (out_alpha * 255.0).round() as u8;
    }
    out
}

/// Gradient alpha at `distance` from the center, padded past both stops.
#[inline]
fn gradient_alpha(distance: f32, inner: f32, outer: f32) -> f32 {
    if outer <= inner {
        return if distance >= outer { OUTER_ALPHA } else { 0.0 };
    }
    let t = ((distance - inner) / (outer - inner)).clamp(0.0, 1.0);
    OUTER_ALPHA * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_unchanged() {
        let buf = RasterBuffer::filled(90, 90, [200, 150, 100, 255]).unwrap();
        let out = apply_vignette(&buf);
        assert_eq!(out.pixel(45, 45), Some([200, 150, 100, 255]));
        assert_eq!(out.pixel(40, 50), Some([200, 150, 100, 255]));
    }

    #[test]
    fn test_corner_gets_full_darkening() {
        // Corner is ~62.9px from center, beyond the 60px outer radius
        let buf = RasterBuffer::filled(90, 90, [200, 150, 100, 255]).unwrap();
        let out = apply_vignette(&buf);
        assert_eq!(out.pixel(0, 0), Some([80, 60, 40, 255]));
        assert_eq!(out.pixel(89, 89), Some([80, 60, 40, 255]));
    }

    #[test]
    fn test_darkening_increases_with_distance() {
        let buf = RasterBuffer::filled(90, 90, [255, 255, 255, 255]).unwrap();
        let out = apply_vignette(&buf);
        let near = out.pixel(45 + 35, 45).unwrap()[0];
        let far = out.pixel(45 + 44, 45).unwrap()[0];
        assert!(near < 255);
        assert!(far < near);
    }

    #[test]
    fn test_transparent_pixels_become_translucent_black() {
        let buf = RasterBuffer::filled(90, 90, [255, 255, 255, 0]).unwrap();
        let out = apply_vignette(&buf);
        assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 153]));
        assert_eq!(out.pixel(45, 45), Some([255, 255, 255, 0]));
    }

    #[test]
    fn test_gradient_alpha_stops() {
        assert_eq!(gradient_alpha(0.0, 10.0, 20.0), 0.0);
        assert_eq!(gradient_alpha(10.0, 10.0, 20.0), 0.0);
        assert!((gradient_alpha(15.0, 10.0, 20.0) - 0.3).abs() < 1e-6);
        assert!((gradient_alpha(20.0, 10.0, 20.0) - 0.6).abs() < 1e-6);
        assert!((gradient_alpha(500.0, 10.0, 20.0) - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_single_pixel() {
        let buf = RasterBuffer::filled(1, 1, [100, 100, 100, 255]).unwrap();
        // The only pixel sits at the center
        assert_eq!(apply_vignette(&buf), buf);
    }
}
