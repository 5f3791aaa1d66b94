//! Spatial convolution: the sharpen/emboss engine.
//!
//! Every destination pixel is the weighted sum of its `side × side`
//! neighborhood in the source image.
//!
//! # Boundary Policy
//!
//! Kernel cells that land outside the image are skipped. They are neither
//! clamped to the nearest edge pixel nor wrapped, so border pixels see fewer
//! contributions than interior pixels.
//!
//! # Channel Storage
//!
//! Red, green and blue sums are accumulated without clamping or
//! normalization by the kernel's weight sum. Only when a sum is written back
//! does it pass through the 8-bit clamped channel semantics of the host's
//! pixel array: values saturate to 0..=255 and round half to even. Alpha is
//! copied unchanged from the source pixel.
//!
//! # Concurrency
//!
//! [`convolve`] is a pure function. On native targets [`engine`] wraps it in
//! a single worker that serializes requests and keeps the caller responsive.

mod kernel;
mod types;

#[cfg(not(target_arch = "wasm32"))]
pub mod engine;

pub use kernel::{Kernel, KernelPreset};
pub use types::{ConvolutionRequest, ConvolveError};

use crate::buffer::{RasterBuffer, CHANNELS};

/// Apply `kernel` to every pixel of `buffer`, returning a new buffer.
///
/// The source is only read, so writes to one destination pixel can never
/// leak into the neighborhood of another. The result has the same
/// dimensions as the input.
///
/// # Example
///
/// ```ignore
/// use retouch_core::{convolve, KernelPreset, RasterBuffer};
///
/// let flat = RasterBuffer::filled(8, 8, [100, 100, 100, 255])?;
/// let sharpened = convolve(&flat, &KernelPreset::Sharpen.kernel());
/// assert_eq!(sharpened.pixel(4, 4), Some([100, 100, 100, 255]));
/// ```
pub fn convolve(buffer: &RasterBuffer, kernel: &Kernel) -> RasterBuffer {
    let w = buffer.width() as i64;
    let h = buffer.height() as i64;
    let side = kernel.side();
    let half = kernel.half_side() as i64;
    let src = buffer.data();

    // Alpha comes along with the copy; only RGB is overwritten below.
    let mut out = src.to_vec();

    for y in 0..h {
        for x in 0..w {
            let (mut r, mut g, mut b) = (0.0f64, 0.0f64, 0.0f64);

            for cy in 0..side {
                let sy = y + cy as i64 - half;
                if sy < 0 || sy >= h {
                    continue;
                }
                for cx in 0..side {
                    let sx = x + cx as i64 - half;
                    if sx < 0 || sx >= w {
                        continue;
                    }
                    let wt = kernel.weight(cy, cx);
                    let i = (sy * w + sx) as usize * CHANNELS;
                    r += src[i] as f64 * wt;
                    g += src[i + 1] as f64 * wt;
                    b += src[i + 2] as f64 * wt;
                }
            }

            let o = (y * w + x) as usize * CHANNELS;
            out[o] = store_channel(r);
            out[o + 1] = store_channel(g);
            out[o + 2] = store_channel(b);
        }
    }

    tracing::trace!(width = w, height = h, side, "convolution finished");

    buffer.with_data(out)
}

/// Write an accumulated channel sum into an 8-bit clamped slot.
///
/// NaN stores 0, everything else saturates to 0..=255 and rounds half to
/// even.
#[inline]
pub fn store_channel(sum: f64) -> u8 {
    if sum.is_nan() {
        return 0;
    }
    sum.clamp(0.0, 255.0).round_ties_even() as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for a random RGBA buffer (kept small for speed).
    fn buffer_strategy() -> impl Strategy<Value = RasterBuffer> {
        (1u32..=12, 1u32..=12).prop_flat_map(|(w, h)| {
            let len = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |data| RasterBuffer::new(w, h, data).unwrap())
        })
    }

    /// Strategy for 1x1, 3x3 or 5x5 kernels with weights in the observed range.
    fn kernel_strategy() -> impl Strategy<Value = Kernel> {
        prop_oneof![Just(1usize), Just(3usize), Just(5usize)].prop_flat_map(|side| {
            prop::collection::vec(-2i8..=5, side * side)
                .prop_map(|w| Kernel::new(w.into_iter().map(f64::from).collect()).unwrap())
        })
    }

    proptest! {
        /// Property: alpha is never modified.
        #[test]
        fn prop_alpha_untouched(input in buffer_strategy(), k in kernel_strategy()) {
            let output = convolve(&input, &k);
            for (a, b) in input.data().chunks_exact(4).zip(output.data().chunks_exact(4)) {
                prop_assert_eq!(a[3], b[3]);
            }
        }

        /// Property: output dimensions always match input dimensions.
        #[test]
        fn prop_dimensions_preserved(input in buffer_strategy(), k in kernel_strategy()) {
            let output = convolve(&input, &k);
            prop_assert_eq!(output.dimensions(), input.dimensions());
            prop_assert_eq!(output.byte_size(), input.byte_size());
        }

        /// Property: same input always produces same output.
        #[test]
        fn prop_deterministic(input in buffer_strategy(), k in kernel_strategy()) {
            prop_assert_eq!(convolve(&input, &k), convolve(&input, &k));
        }

        /// Property: the center-only kernel is the identity.
        #[test]
        fn prop_identity_kernel(input in buffer_strategy()) {
            let k = Kernel::new(vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
            prop_assert_eq!(convolve(&input, &k), input);
        }

        /// Property: sharpen leaves interior pixels of a flat image unchanged.
        #[test]
        fn prop_sharpen_flat_interior(
            (w, h) in (3u32..=10, 3u32..=10),
            rgba in any::<[u8; 4]>(),
        ) {
            let input = RasterBuffer::filled(w, h, rgba).unwrap();
            let output = convolve(&input, &KernelPreset::Sharpen.kernel());
            for y in 1..h - 1 {
                for x in 1..w - 1 {
                    prop_assert_eq!(output.pixel(x, y), Some(rgba));
                }
            }
        }
    }
}
