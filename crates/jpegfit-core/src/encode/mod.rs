//! Image encoding for jpegfit.
//!
//! This module provides functionality for:
//! - Encoding the opaque working image to JPEG at a given quality
//!
//! # Examples
//!
//! ```ignore
//! use jpegfit_core::encode::encode_jpeg;
//!
//! let image = image::RgbImage::new(100, 100);
//! let jpeg_bytes = encode_jpeg(&image, 90).unwrap();
//! println!("Encoded {} bytes", jpeg_bytes.len());
//! ```

mod jpeg;

pub use jpeg::{encode_jpeg, EncodeError};
