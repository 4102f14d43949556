//! Image decoding and resampling.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG, GIF, WebP and BMP input into a [`SourceImage`]
//! - Classifying transparency so the normalizer knows when to flatten
//! - Applying EXIF orientation before the metadata is lost on re-encode
//! - Resizing the opaque working image (dimension bound and shrink rounds)
//!
//! All operations are synchronous and single-threaded.
//!
//! # Examples
//!
//! ```ignore
//! use jpegfit_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let source = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", source.width(), source.height());
//! ```

mod resize;
mod source;
mod types;

pub use resize::{fit_dimensions, resize, resize_to_fit, scale_dimensions};
pub use source::{decode_image, decode_image_with_limits};
pub use types::{
    ColorMode, DecodeError, DecodeLimits, FilterType, Orientation, SourceImage, DEFAULT_MAX_PIXELS,
};
