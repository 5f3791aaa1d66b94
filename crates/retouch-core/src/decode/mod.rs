//! Decoding of source image files into [`RasterBuffer`](crate::RasterBuffer)s.
//!
//! Any format the `image` crate is built with (PNG and JPEG) is accepted.
//! Output is always RGBA8. EXIF orientation is applied so pixels come out
//! upright, the way a browser shows a photo.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod load;
mod types;

pub use load::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation};
