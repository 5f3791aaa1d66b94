//! Export encoding.
//!
//! Edits are exported as lossless PNG so that the alpha channel and every
//! stored channel value survive the round trip.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::encode::{encode_png, DEFAULT_EXPORT_NAME};
//!
//! let png = encode_png(&edited).unwrap();
//! std::fs::write(DEFAULT_EXPORT_NAME, png).unwrap();
//! ```

mod png;

pub use png::{encode_png, EncodeError, DEFAULT_EXPORT_NAME};
