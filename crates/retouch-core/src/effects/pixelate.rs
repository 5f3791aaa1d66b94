//! Block pixelation.
//!
//! The image is shrunk by the block size with a smoothing filter, then
//! blown back up to its original size with nearest-neighbor sampling, so
//! each block shows the averaged color of its region.

use image::imageops::{self, FilterType};

use crate::buffer::RasterBuffer;

/// Block edge length used by the editor's pixelate button.
pub const DEFAULT_BLOCK_SIZE: u32 = 10;

/// Pixelate `buffer` into `block_size × block_size` blocks.
///
/// A block size of 0 or 1 returns an unchanged copy. Dimensions are always
/// preserved; blocks on the right and bottom edges may be cut short.
pub fn pixelate(buffer: &RasterBuffer, block_size: u32) -> RasterBuffer {
    if block_size <= 1 {
        return buffer.clone();
    }

    let (width, height) = buffer.dimensions();
    let small_w = width.div_ceil(block_size).max(1);
    let small_h = height.div_ceil(block_size).max(1);

    let small = imageops::resize(&buffer.to_rgba_image(), small_w, small_h, FilterType::Triangle);
    let restored = imageops::resize(&small, width, height, FilterType::Nearest);

    RasterBuffer::from_image_output(restored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterBuffer {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&[(x * 12) as u8, (y * 12) as u8, 100, 255]);
            }
        }
        RasterBuffer::new(width, height, data).unwrap()
    }

    #[test]
    fn test_block_size_one_is_identity() {
        let buf = gradient(8, 8);
        assert_eq!(pixelate(&buf, 1), buf);
        assert_eq!(pixelate(&buf, 0), buf);
    }

    #[test]
    fn test_dimensions_preserved() {
        let buf = gradient(21, 13);
        assert_eq!(pixelate(&buf, DEFAULT_BLOCK_SIZE).dimensions(), (21, 13));
    }

    #[test]
    fn test_blocks_are_uniform() {
        let buf = gradient(20, 20);
        let out = pixelate(&buf, 10);
        for (bx, by) in [(0, 0), (10, 0), (0, 10), (10, 10)] {
            let first = out.pixel(bx, by).unwrap();
            for y in by..by + 10 {
                for x in bx..bx + 10 {
                    assert_eq!(out.pixel(x, y), Some(first), "block ({bx}, {by}) at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_flat_image_unchanged() {
        let buf = RasterBuffer::filled(30, 20, [40, 80, 120, 255]).unwrap();
        assert_eq!(pixelate(&buf, 10), buf);
    }

    #[test]
    fn test_block_larger_than_image() {
        let buf = gradient(4, 3);
        let out = pixelate(&buf, 50);
        let first = out.pixel(0, 0).unwrap();
        assert!(out.data().chunks_exact(4).all(|p| p == first));
    }
}
