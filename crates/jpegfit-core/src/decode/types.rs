//! Core types for image decoding.

use image::{DynamicImage, GenericImageView, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default upper bound on decoded pixels (100 megapixels).
pub const DEFAULT_MAX_PIXELS: u64 = 100_000_000;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// No bytes were supplied.
    #[error("Empty image data")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    UnsupportedFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    Corrupted(String),

    /// The header declares more pixels than the decode limits allow.
    #[error("Image too large: {width}x{height} exceeds the limit of {max_pixels} pixels")]
    TooLarge {
        width: u32,
        height: u32,
        max_pixels: u64,
    },

    /// The decoder refused to allocate for this image.
    #[error("Image exceeds decoder memory limits: {0}")]
    ResourceLimit(String),
}

/// Limits applied before a full decode is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeLimits {
    /// Maximum `width * height` accepted from the image header.
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

impl DecodeLimits {
    /// Check header dimensions against the limits.
    pub fn check(&self, width: u32, height: u32) -> Result<(), DecodeError> {
        let pixels = (width as u64) * (height as u64);
        if pixels > self.max_pixels {
            return Err(DecodeError::TooLarge {
                width,
                height,
                max_pixels: self.max_pixels,
            });
        }
        Ok(())
    }
}

/// Filter type for image resizing operations.
///
/// Only smoothing filters are offered; nearest-neighbour sampling is never
/// used when shrinking for compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// How the source image represents (or lacks) transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// No transparency information.
    Opaque,
    /// A per-pixel alpha channel (RGBA, grey + alpha).
    Alpha,
    /// A palette image whose metadata declares transparent entries.
    IndexedTransparent,
}

impl ColorMode {
    /// Returns true if the image must be composited before encoding.
    #[inline]
    pub fn needs_flattening(self) -> bool {
        !matches!(self, ColorMode::Opaque)
    }
}

/// A decoded input image, before normalization.
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Decoded pixels in whatever layout the decoder produced.
    pub image: DynamicImage,
    /// Transparency classification of the input.
    pub color_mode: ColorMode,
    /// Container format detected from the input bytes.
    pub format: Option<ImageFormat>,
}

impl SourceImage {
    /// Wrap an already-decoded image, classifying it by its channel layout.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let color_mode = if image.color().has_alpha() {
            ColorMode::Alpha
        } else {
            ColorMode::Opaque
        };
        Self {
            image,
            color_mode,
            format: None,
        }
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
