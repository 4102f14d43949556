//! JPEG encoding of the opaque working image.
//!
//! Encoding uses the `image` crate's baseline JPEG encoder. The input type is
//! `RgbImage`, so an alpha channel can never reach the encoder.

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an RGB image to JPEG bytes.
///
/// `quality` is clamped to 1-100, where 100 is the least lossy.
///
/// # Example
///
/// ```
/// use jpegfit_core::encode::encode_jpeg;
///
/// let image = image::RgbImage::from_pixel(100, 100, image::Rgb([128, 128, 128]));
/// let jpeg = encode_jpeg(&image, 90).unwrap();
///
/// // Verify JPEG magic bytes
/// assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
/// ```
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(image.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces a framed JPEG for non-empty input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=50,
            height in 1u32..=50,
            quality in 1u8..=100,
        ) {
            let img = RgbImage::from_pixel(width, height, image::Rgb([128, 64, 32]));
            let jpeg_bytes = encode_jpeg(&img, quality).unwrap();

            let len = jpeg_bytes.len();
            prop_assert!(len >= 4);
            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Same input always produces same output size.
        #[test]
        fn prop_deterministic_size(
            width in 1u32..=20,
            height in 1u32..=20,
            quality in 1u8..=100,
        ) {
            let img = RgbImage::from_fn(width, height, |x, y| {
                image::Rgb([(x * 13) as u8, (y * 7) as u8, ((x + y) * 3) as u8])
            });

            let first = encode_jpeg(&img, quality).unwrap();
            let second = encode_jpeg(&img, quality).unwrap();
            prop_assert_eq!(first.len(), second.len());
        }
    }
}
