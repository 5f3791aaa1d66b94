//! Tonal filter stack
//!
//! Applies the nine slider-driven filters to RGBA pixel data, with the same
//! semantics as the CSS filter functions the browser host renders with.
//!
//! ## Filter Order
//! 1. Brightness
//! 2. Contrast
//! 3. Grayscale
//! 4. Blur
//! 5. Saturate
//! 6. Hue rotate
//! 7. Invert
//! 8. Sepia
//! 9. Opacity
//!
//! Every step works on normalized 0..1 values and clamps its result back into
//! that range before the next step runs. Steps at their identity value are
//! skipped.

use crate::buffer::{RasterBuffer, CHANNELS};
use crate::FilterSettings;

type ColorMatrix = [[f32; 3]; 3];

/// Largest blur standard deviation the slider allows, in pixels.
pub const MAX_BLUR: f32 = 10.0;

/// Apply every filter in `settings` and return the filtered buffer.
///
/// # Arguments
/// * `buffer` - Source pixels (unchanged)
/// * `settings` - Slider values in UI units
///
/// # Example
/// ```ignore
/// use retouch_core::{adjustments::apply_filters, FilterSettings, RasterBuffer};
///
/// let gray = RasterBuffer::filled(1, 1, [64, 64, 64, 255])?;
/// let mut settings = FilterSettings::default();
/// settings.brightness = 100.0; // brightness(200%)
///
/// let out = apply_filters(&gray, &settings);
/// assert_eq!(out.pixel(0, 0), Some([128, 128, 128, 255]));
/// ```
pub fn apply_filters(buffer: &RasterBuffer, settings: &FilterSettings) -> RasterBuffer {
    // Early exit if no filters
    if settings.is_default() {
        return buffer.clone();
    }

    let mut out = buffer.clone();

    map_pixels(&mut out, |rgb, alpha| {
        let mut rgb = rgb;
        rgb = apply_brightness(rgb, settings.brightness);
        rgb = apply_contrast(rgb, settings.contrast);
        rgb = apply_grayscale(rgb, settings.grayscale);
        (rgb, alpha)
    });

    if settings.blur > 0.0 {
        out = apply_blur(out, settings.blur);
    }

    map_pixels(&mut out, |rgb, alpha| {
        let mut rgb = rgb;
        rgb = apply_saturate(rgb, settings.saturate);
        rgb = apply_hue_rotate(rgb, settings.hue_rotate);
        rgb = apply_invert(rgb, settings.invert);
        rgb = apply_sepia(rgb, settings.sepia);
        (rgb, apply_opacity(alpha, settings.opacity))
    });

    out
}

/// Run `f` over every pixel in normalized space and write the result back.
fn map_pixels<F>(buffer: &mut RasterBuffer, f: F)
where
    F: Fn([f32; 3], f32) -> ([f32; 3], f32),
{
    for chunk in buffer.data_mut().chunks_exact_mut(CHANNELS) {
        let rgb = [
            chunk[0] as f32 / 255.0,
            chunk[1] as f32 / 255.0,
            chunk[2] as f32 / 255.0,
        ];
        let alpha = chunk[3] as f32 / 255.0;

        let (rgb, alpha) = f(rgb, alpha);

        chunk[0] = quantize(rgb[0]);
        chunk[1] = quantize(rgb[1]);
        chunk[2] = quantize(rgb[2]);
        chunk[3] = quantize(alpha);
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[inline]
fn clamp_rgb(rgb: [f32; 3]) -> [f32; 3] {
    [
        rgb[0].clamp(0.0, 1.0),
        rgb[1].clamp(0.0, 1.0),
        rgb[2].clamp(0.0, 1.0),
    ]
}

#[inline]
fn apply_matrix(rgb: [f32; 3], m: &ColorMatrix) -> [f32; 3] {
    clamp_rgb([
        m[0][0] * rgb[0] + m[0][1] * rgb[1] + m[0][2] * rgb[2],
        m[1][0] * rgb[0] + m[1][1] * rgb[1] + m[1][2] * rgb[2],
        m[2][0] * rgb[0] + m[2][1] * rgb[1] + m[2][2] * rgb[2],
    ])
}

/// Convert a percentage slider to a 0..1 amount.
#[inline]
fn amount(percent: f32) -> f32 {
    (percent / 100.0).clamp(0.0, 1.0)
}

/// Apply brightness.
///
/// The slider is an offset: `brightness(100 + v %)`.
///
/// Formula: `output = input * (100 + v) / 100`
#[inline]
fn apply_brightness(rgb: [f32; 3], brightness: f32) -> [f32; 3] {
    if brightness == 0.0 {
        return rgb;
    }
    let factor = ((100.0 + brightness) / 100.0).max(0.0);
    clamp_rgb([rgb[0] * factor, rgb[1] * factor, rgb[2] * factor])
}

/// Apply contrast.
///
/// The slider is an offset: `contrast(100 + v %)`.
///
/// Formula: `output = (input - 0.5) * (100 + v) / 100 + 0.5`
#[inline]
fn apply_contrast(rgb: [f32; 3], contrast: f32) -> [f32; 3] {
    if contrast == 0.0 {
        return rgb;
    }
    let factor = ((100.0 + contrast) / 100.0).max(0.0);
    clamp_rgb([
        (rgb[0] - 0.5) * factor + 0.5,
        (rgb[1] - 0.5) * factor + 0.5,
        (rgb[2] - 0.5) * factor + 0.5,
    ])
}

/// Apply grayscale (0-100%).
#[inline]
fn apply_grayscale(rgb: [f32; 3], grayscale: f32) -> [f32; 3] {
    if grayscale <= 0.0 {
        return rgb;
    }
    let a = 1.0 - amount(grayscale);
    let m = [
        [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
    ];
    apply_matrix(rgb, &m)
}

/// Gaussian blur with standard deviation `radius` pixels, capped at [`MAX_BLUR`].
fn apply_blur(buffer: RasterBuffer, radius: f32) -> RasterBuffer {
    let blurred = image::imageops::blur(&buffer.to_rgba_image(), radius.min(MAX_BLUR));
    buffer.with_data(blurred.into_raw())
}

/// Apply saturate (100% = unchanged, 0% = fully desaturated).
#[inline]
fn apply_saturate(rgb: [f32; 3], saturate: f32) -> [f32; 3] {
    if saturate == 100.0 {
        return rgb;
    }
    let s = (saturate / 100.0).max(0.0);
    let m = [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ];
    apply_matrix(rgb, &m)
}

/// Apply hue rotation in degrees.
#[inline]
fn apply_hue_rotate(rgb: [f32; 3], degrees: f32) -> [f32; 3] {
    if degrees % 360.0 == 0.0 {
        return rgb;
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let m = [
        [
            0.213 + cos * 0.787 - sin * 0.213,
            0.715 - cos * 0.715 - sin * 0.715,
            0.072 - cos * 0.072 + sin * 0.928,
        ],
        [
            0.213 - cos * 0.213 + sin * 0.143,
            0.715 + cos * 0.285 + sin * 0.140,
            0.072 - cos * 0.072 - sin * 0.283,
        ],
        [
            0.213 - cos * 0.213 - sin * 0.787,
            0.715 - cos * 0.715 + sin * 0.715,
            0.072 + cos * 0.928 + sin * 0.072,
        ],
    ];
    apply_matrix(rgb, &m)
}

/// Apply invert (0-100%).
///
/// Formula: `output = input * (1 - i) + (1 - input) * i`
#[inline]
fn apply_invert(rgb: [f32; 3], invert: f32) -> [f32; 3] {
    if invert <= 0.0 {
        return rgb;
    }
    let i = amount(invert);
    clamp_rgb([
        rgb[0] * (1.0 - i) + (1.0 - rgb[0]) * i,
        rgb[1] * (1.0 - i) + (1.0 - rgb[1]) * i,
        rgb[2] * (1.0 - i) + (1.0 - rgb[2]) * i,
    ])
}

/// Apply sepia (0-100%).
#[inline]
fn apply_sepia(rgb: [f32; 3], sepia: f32) -> [f32; 3] {
    if sepia <= 0.0 {
        return rgb;
    }
    let a = 1.0 - amount(sepia);
    let m = [
        [0.393 + 0.607 * a, 0.769 - 0.769 * a, 0.189 - 0.189 * a],
        [0.349 - 0.349 * a, 0.686 + 0.314 * a, 0.168 - 0.168 * a],
        [0.272 - 0.272 * a, 0.534 - 0.534 * a, 0.131 + 0.869 * a],
    ];
    apply_matrix(rgb, &m)
}

/// Scale alpha by the opacity percentage.
#[inline]
fn apply_opacity(alpha: f32, opacity: f32) -> f32 {
    if opacity >= 100.0 {
        return alpha;
    }
    alpha * amount(opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to create a 1x1 opaque buffer
    fn pixel(r: u8, g: u8, b: u8) -> RasterBuffer {
        RasterBuffer::new(1, 1, vec![r, g, b, 255]).unwrap()
    }

    /// Helper to apply filters and return the resulting pixel
    fn apply(buffer: &RasterBuffer, settings: &FilterSettings) -> [u8; 4] {
        apply_filters(buffer, settings).pixel(0, 0).unwrap()
    }

    fn close(a: u8, b: u8, tolerance: i32) -> bool {
        (a as i32 - b as i32).abs() <= tolerance
    }

    // ===== Identity Tests =====

    #[test]
    fn test_identity_default_settings() {
        let buf = pixel(128, 64, 192);
        assert_eq!(apply(&buf, &FilterSettings::default()), [128, 64, 192, 255]);
    }

    #[test]
    fn test_identity_preserves_alpha() {
        let buf = RasterBuffer::new(1, 1, vec![1, 2, 3, 4]).unwrap();
        assert_eq!(apply(&buf, &FilterSettings::default()), [1, 2, 3, 4]);
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_doubles() {
        let mut s = FilterSettings::default();
        s.brightness = 100.0;
        assert_eq!(apply(&pixel(64, 64, 64), &s), [128, 128, 128, 255]);
    }

    #[test]
    fn test_brightness_minimum_is_black() {
        let mut s = FilterSettings::default();
        s.brightness = -100.0;
        assert_eq!(apply(&pixel(200, 100, 50), &s), [0, 0, 0, 255]);
    }

    #[test]
    fn test_brightness_clips_at_white() {
        let mut s = FilterSettings::default();
        s.brightness = 100.0;
        assert_eq!(apply(&pixel(200, 200, 200), &s), [255, 255, 255, 255]);
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_increase_spreads_values() {
        let mut s = FilterSettings::default();
        s.contrast = 100.0;
        let out = apply(&pixel(64, 128, 192), &s);
        assert!(out[0] < 64);
        assert!(close(out[1], 128, 2));
        assert_eq!(out[2], 255);
    }

    #[test]
    fn test_contrast_minimum_is_mid_gray() {
        let mut s = FilterSettings::default();
        s.contrast = -100.0;
        let out = apply(&pixel(0, 100, 255), &s);
        assert_eq!(out, [128, 128, 128, 255]);
    }

    // ===== Grayscale / Saturate Tests =====

    #[test]
    fn test_grayscale_full_equalizes_channels() {
        let mut s = FilterSettings::default();
        s.grayscale = 100.0;
        let out = apply(&pixel(200, 50, 100), &s);
        assert!(close(out[0], out[1], 1) && close(out[1], out[2], 1));
    }

    #[test]
    fn test_grayscale_over_100_is_clamped() {
        let mut full = FilterSettings::default();
        full.grayscale = 100.0;
        let mut over = FilterSettings::default();
        over.grayscale = 250.0;
        let buf = pixel(10, 200, 90);
        assert_eq!(apply(&buf, &full), apply(&buf, &over));
    }

    #[test]
    fn test_saturate_zero_desaturates() {
        let mut s = FilterSettings::default();
        s.saturate = 0.0;
        let out = apply(&pixel(255, 0, 0), &s);
        assert!(close(out[0], out[1], 1) && close(out[1], out[2], 1));
    }

    #[test]
    fn test_saturate_boost_increases_spread() {
        let mut s = FilterSettings::default();
        s.saturate = 200.0;
        let out = apply(&pixel(160, 120, 100), &s);
        assert!(out[0] as i32 - out[2] as i32 > 60);
    }

    // ===== Hue Rotate Tests =====

    #[test]
    fn test_hue_rotate_full_turn_is_identity() {
        let mut s = FilterSettings::default();
        s.hue_rotate = 360.0;
        assert_eq!(apply(&pixel(30, 140, 220), &s), [30, 140, 220, 255]);
    }

    #[test]
    fn test_hue_rotate_moves_red_toward_green() {
        let mut s = FilterSettings::default();
        s.hue_rotate = 120.0;
        let out = apply(&pixel(255, 0, 0), &s);
        assert!(out[1] > out[0], "red rotated 120° should be mostly green: {out:?}");
    }

    #[test]
    fn test_hue_rotate_keeps_gray() {
        let mut s = FilterSettings::default();
        s.hue_rotate = 90.0;
        let out = apply(&pixel(100, 100, 100), &s);
        assert!(close(out[0], 100, 1) && close(out[1], 100, 1) && close(out[2], 100, 1));
    }

    // ===== Invert Tests =====

    #[test]
    fn test_invert_full() {
        let mut s = FilterSettings::default();
        s.invert = 100.0;
        assert_eq!(apply(&pixel(0, 64, 255), &s), [255, 191, 0, 255]);
    }

    #[test]
    fn test_invert_half_is_mid_gray() {
        let mut s = FilterSettings::default();
        s.invert = 50.0;
        assert_eq!(apply(&pixel(0, 255, 0), &s), [128, 128, 128, 255]);
    }

    // ===== Sepia Tests =====

    #[test]
    fn test_sepia_full_on_white() {
        let mut s = FilterSettings::default();
        s.sepia = 100.0;
        // Rows sum to 1.351, 1.203, 0.937
        assert_eq!(apply(&pixel(255, 255, 255), &s), [255, 255, 239, 255]);
    }

    #[test]
    fn test_sepia_warms_gray() {
        let mut s = FilterSettings::default();
        s.sepia = 100.0;
        let out = apply(&pixel(100, 100, 100), &s);
        assert!(out[0] > out[1] && out[1] > out[2]);
    }

    // ===== Opacity Tests =====

    #[test]
    fn test_opacity_scales_alpha_only() {
        let mut s = FilterSettings::default();
        s.opacity = 50.0;
        assert_eq!(apply(&pixel(10, 20, 30), &s), [10, 20, 30, 128]);
    }

    #[test]
    fn test_opacity_zero_is_transparent() {
        let mut s = FilterSettings::default();
        s.opacity = 0.0;
        assert_eq!(apply(&pixel(10, 20, 30), &s)[3], 0);
    }

    // ===== Blur Tests =====

    #[test]
    fn test_blur_flat_image_stays_flat() {
        let buf = RasterBuffer::filled(12, 12, [90, 120, 150, 255]).unwrap();
        let mut s = FilterSettings::default();
        s.blur = 2.0;
        let out = apply_filters(&buf, &s);
        let center = out.pixel(6, 6).unwrap();
        assert!(close(center[0], 90, 1));
        assert!(close(center[1], 120, 1));
        assert!(close(center[2], 150, 1));
    }

    #[test]
    fn test_blur_softens_edge() {
        // Left half black, right half white
        let mut buf = RasterBuffer::filled(20, 4, [0, 0, 0, 255]).unwrap();
        for y in 0..4 {
            for x in 10..20 {
                buf.set_pixel(x, y, [255, 255, 255, 255]);
            }
        }
        let mut s = FilterSettings::default();
        s.blur = 2.0;
        let out = apply_filters(&buf, &s);
        let left_of_edge = out.pixel(9, 2).unwrap()[0];
        let right_of_edge = out.pixel(10, 2).unwrap()[0];
        assert!(left_of_edge > 0 && left_of_edge < 255);
        assert!(right_of_edge > 0 && right_of_edge < 255);
    }

    #[test]
    fn test_blur_preserves_dimensions() {
        let buf = RasterBuffer::filled(7, 3, [1, 2, 3, 255]).unwrap();
        let mut s = FilterSettings::default();
        s.blur = 5.0;
        assert_eq!(apply_filters(&buf, &s).dimensions(), (7, 3));
    }

    #[test]
    fn test_blur_beyond_range_is_capped() {
        let mut buf = RasterBuffer::filled(6, 6, [0, 0, 0, 255]).unwrap();
        buf.set_pixel(3, 3, [255, 255, 255, 255]);
        let mut capped = FilterSettings::default();
        capped.blur = MAX_BLUR;
        let mut huge = FilterSettings::default();
        huge.blur = 1e9;
        assert_eq!(apply_filters(&buf, &huge), apply_filters(&buf, &capped));
        huge.blur = f32::INFINITY;
        assert_eq!(apply_filters(&buf, &huge), apply_filters(&buf, &capped));
    }

    // ===== Combined =====

    #[test]
    fn test_input_untouched() {
        let buf = pixel(12, 34, 56);
        let mut s = FilterSettings::default();
        s.invert = 100.0;
        s.sepia = 40.0;
        let _ = apply_filters(&buf, &s);
        assert_eq!(buf.pixel(0, 0), Some([12, 34, 56, 255]));
    }

    #[test]
    fn test_extreme_values_dont_crash() {
        let buf = RasterBuffer::filled(4, 4, [128, 128, 128, 255]).unwrap();
        let s = FilterSettings {
            brightness: 100.0,
            contrast: 100.0,
            grayscale: 100.0,
            blur: 10.0,
            saturate: 200.0,
            hue_rotate: 360.0,
            invert: 100.0,
            sepia: 100.0,
            opacity: 0.0,
        };
        assert_eq!(apply_filters(&buf, &s).byte_size(), 64);
    }
}
