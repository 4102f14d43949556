//! Image decoding with format sniffing, size limits and EXIF orientation.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use super::{ColorMode, DecodeError, DecodeLimits, Orientation, SourceImage};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";
const PNG_COLOR_TYPE_INDEXED: u8 = 3;

/// Decode an image from bytes using the default [`DecodeLimits`].
///
/// See [`decode_image_with_limits`].
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    decode_image_with_limits(bytes, &DecodeLimits::default())
}

/// Decode an image from bytes, rejecting inputs whose header exceeds `limits`.
///
/// The container format is detected from magic bytes. EXIF orientation, when
/// present, is applied to the pixels because the re-encoded JPEG carries no
/// metadata of its own.
///
/// # Errors
///
/// * `DecodeError::Empty` if `bytes` is empty
/// * `DecodeError::UnsupportedFormat` if the format is unknown or not compiled in
/// * `DecodeError::TooLarge` if the header dimensions exceed `limits`
/// * `DecodeError::ResourceLimit` if the decoder's own allocation cap is hit
/// * `DecodeError::Corrupted` if the decoder fails part-way
pub fn decode_image_with_limits(
    bytes: &[u8],
    limits: &DecodeLimits,
) -> Result<SourceImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedFormat)?;

    // Header-only pass so oversized inputs never allocate a pixel buffer
    let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
        .into_dimensions()
        .map_err(map_image_error)?;
    limits.check(width, height)?;

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(map_image_error)?;

    let color_mode = classify_color_mode(&img, format, bytes);
    let img = apply_orientation(img, extract_orientation(bytes));

    log::debug!(
        "decoded {:?} image {}x{} ({:?}, {:?})",
        format,
        img.width(),
        img.height(),
        img.color(),
        color_mode
    );

    Ok(SourceImage {
        image: img,
        color_mode,
        format: Some(format),
    })
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat,
        ImageError::Limits(limit) => DecodeError::ResourceLimit(limit.to_string()),
        other => DecodeError::Corrupted(other.to_string()),
    }
}

/// Classify transparency, preferring container metadata over the decoded layout.
///
/// Palette PNGs are expanded to RGBA by the decoder when a `tRNS` chunk is
/// present, so the palette case has to be read from the raw chunks.
fn classify_color_mode(img: &DynamicImage, format: ImageFormat, bytes: &[u8]) -> ColorMode {
    if format == ImageFormat::Png && png_palette_has_transparency(bytes) {
        ColorMode::IndexedTransparent
    } else if img.color().has_alpha() {
        ColorMode::Alpha
    } else {
        ColorMode::Opaque
    }
}

/// Returns true for a palette PNG that declares transparent entries.
///
/// Walks chunk headers only; CRCs and compressed data are not inspected.
pub(crate) fn png_palette_has_transparency(bytes: &[u8]) -> bool {
    let Some(mut rest) = bytes.strip_prefix(PNG_SIGNATURE) else {
        return false;
    };

    let mut indexed = false;
    while rest.len() >= 8 {
        let len = u32::from_be_bytes([rest[0], rest[1], rest[2], rest[3]]) as usize;
        let kind = &rest[4..8];
        let body_start: usize = 8;
        let Some(body_end) = body_start.checked_add(len) else {
            return false;
        };

        match kind {
            b"IHDR" => {
                // Colour type is the 10th byte of IHDR data
                match rest.get(body_start + 9) {
                    Some(&color_type) => indexed = color_type == PNG_COLOR_TYPE_INDEXED,
                    None => return false,
                }
            }
            b"tRNS" => return indexed,
            b"IDAT" | b"IEND" => return false,
            _ => {}
        }

        // Skip body and CRC
        match body_end.checked_add(4).and_then(|next| rest.get(next..)) {
            Some(next) => rest = next,
            None => return false,
        }
    }
    false
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
