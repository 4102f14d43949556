//! jpegfit Core - size-constrained JPEG re-encoding
//!
//! This crate takes a single raster image and re-encodes it as a JPEG no
//! larger than a byte budget, keeping as much quality and resolution as the
//! budget allows. The pipeline is:
//!
//! 1. validate the [`CompressionParameters`]
//! 2. decode the input bytes ([`decode`])
//! 3. flatten transparency onto white ([`normalize`])
//! 4. bound the larger side to `max_dimension`
//! 5. search quality, then dimensions, until the encode fits ([`search`])
//!
//! Everything runs synchronously on the calling thread and each call owns all
//! of its buffers.

pub mod decode;
pub mod encode;
pub mod error;
pub mod filename;
pub mod normalize;
pub mod params;
pub mod search;

pub use decode::{decode_image, ColorMode, DecodeError, DecodeLimits, SourceImage};
pub use encode::EncodeError;
pub use error::{CompressError, ErrorKind};
pub use filename::derive_filename;
pub use params::{CompressionParameters, ParameterError};
pub use search::{CompressionReport, EncodeAttempt, SearchOutcome, SearchState, Step};

use decode::{resize_to_fit, FilterType};

/// A JPEG that fits the requested budget, plus how it was reached.
#[derive(Debug, Clone)]
pub struct CompressedImage {
    /// JPEG-encoded bytes.
    pub bytes: Vec<u8>,
    /// Suggested download name, e.g. `photo_compressed.jpg`.
    pub filename: String,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Quality of the accepted encode.
    pub quality: u8,
    /// Every encode attempt, in order.
    pub report: CompressionReport,
}

/// Compress raw image bytes to a JPEG within `params.max_bytes()`.
///
/// Parameters are validated before the input is decoded. `filename` is only
/// used to derive [`CompressedImage::filename`].
///
/// # Errors
///
/// * `CompressError::InvalidParameters` for out-of-range parameters
/// * `CompressError::Decode` if `bytes` is not a supported image
/// * `CompressError::Unsatisfiable` if the budget cannot be met above the
///   dimension floor
pub fn compress_image(
    bytes: &[u8],
    filename: &str,
    params: &CompressionParameters,
) -> Result<CompressedImage, CompressError> {
    compress_image_with_limits(bytes, filename, params, &DecodeLimits::default())
}

/// [`compress_image`] with explicit decode limits.
pub fn compress_image_with_limits(
    bytes: &[u8],
    filename: &str,
    params: &CompressionParameters,
    limits: &DecodeLimits,
) -> Result<CompressedImage, CompressError> {
    params.validate()?;

    let source = decode::decode_image_with_limits(bytes, limits)?;
    let outcome = compress_source(source, params)?;

    Ok(CompressedImage {
        bytes: outcome.bytes,
        filename: derive_filename(filename),
        width: outcome.width,
        height: outcome.height,
        quality: outcome.quality,
        report: outcome.report,
    })
}

/// Normalize, bound and search an already-decoded image.
pub fn compress_source(
    source: SourceImage,
    params: &CompressionParameters,
) -> Result<SearchOutcome, CompressError> {
    params.validate()?;

    let working = normalize::normalize(source);
    let working = resize_to_fit(working, params.max_dimension, FilterType::Lanczos3);
    search::compress_to_target(working, params)
}
