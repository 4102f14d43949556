//! Size-constrained compression WASM bindings.
//!
//! This module exposes `jpegfit_core::compress_image` to JavaScript. Failures
//! are thrown as `Error` objects carrying a `kind` property so callers can
//! tell bad input from an unreachable budget.
//!
//! # Functions
//!
//! - [`compress_image`] - Compress with the default options
//! - [`compress_image_with_options`] - Compress with explicit options
//!
//! # Example
//!
//! ```typescript
//! import { compress_image_with_options, JsCompressionOptions } from '@jpegfit/wasm';
//!
//! const options = new JsCompressionOptions();
//! options.max_size_kb = 250;
//!
//! try {
//!   const result = compress_image_with_options(bytes, file.name, options);
//!   download(new Blob([result.bytes()], { type: 'image/jpeg' }), result.filename);
//! } catch (e) {
//!   if (e.kind === 'unsatisfiable') showHint('Try a larger size limit');
//! }
//! ```

use crate::options::JsCompressionOptions;
use jpegfit_core::{CompressError, CompressedImage, CompressionParameters, ErrorKind};
use wasm_bindgen::prelude::*;

/// Filename stem used when the caller supplies none.
pub const DEFAULT_FILENAME: &str = "image";

/// A compressed JPEG returned to JavaScript.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsCompressedImage {
    inner: CompressedImage,
}

#[wasm_bindgen]
impl JsCompressedImage {
    /// Suggested download filename
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename.clone()
    }

    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Quality of the accepted encode
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality
    }

    /// Size of the JPEG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes.len()
    }

    /// Number of encodes the search performed
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> usize {
        self.inner.report.encode_count()
    }

    /// Returns the JPEG bytes as Uint8Array.
    ///
    /// Note: This creates a copy of the data in JavaScript memory.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Every encode attempt as an array of `{ quality, width, height, bytes }`
    pub fn report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.report.attempts)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Compress an image with the default options (400 KB budget).
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
/// * `filename` - Original filename, used for the suggested output name
///
/// # Errors
///
/// Throws an `Error` whose `kind` is one of `invalid_input`,
/// `invalid_parameters`, `unsatisfiable` or `internal`.
#[wasm_bindgen]
pub fn compress_image(bytes: &[u8], filename: Option<String>) -> Result<JsCompressedImage, JsValue> {
    run(bytes, filename.as_deref(), &CompressionParameters::new()).map_err(|e| to_js_error(&e))
}

/// Compress an image with explicit options.
///
/// # Example
///
/// ```typescript
/// const options = new JsCompressionOptions();
/// options.max_size_kb = 100;
/// options.min_quality = 40;
/// const result = compress_image_with_options(bytes, 'photo.png', options);
/// console.log(`${result.filename}: ${result.byte_length} bytes at q${result.quality}`);
/// ```
#[wasm_bindgen]
pub fn compress_image_with_options(
    bytes: &[u8],
    filename: Option<String>,
    options: &JsCompressionOptions,
) -> Result<JsCompressedImage, JsValue> {
    run(bytes, filename.as_deref(), options.inner()).map_err(|e| to_js_error(&e))
}

fn run(
    bytes: &[u8],
    filename: Option<&str>,
    params: &CompressionParameters,
) -> Result<JsCompressedImage, CompressError> {
    let filename = filename
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(DEFAULT_FILENAME);

    jpegfit_core::compress_image(bytes, filename, params).map(|inner| JsCompressedImage { inner })
}

/// Error shape thrown across the boundary.
#[derive(Debug)]
struct ErrorPayload {
    kind: ErrorKind,
    message: String,
}

impl ErrorPayload {
    fn from_error(err: &CompressError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

fn to_js_error(err: &CompressError) -> JsValue {
    let payload = ErrorPayload::from_error(err);
    let error = js_sys::Error::new(&payload.message);
    let _ = js_sys::Reflect::set(
        &error,
        &JsValue::from_str("kind"),
        &JsValue::from_str(payload.kind.as_str()),
    );
    error.into()
}

/// Tests for compress bindings.
///
/// Functions returning `Result<T, JsValue>` only work on wasm32 targets, so
/// these tests exercise `run` and the error payload directly.
#[cfg(test)]
mod tests {
    use super::*;
    use jpegfit_core::ParameterError;

    fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 60, 90]));
        jpegfit_core::encode::encode_jpeg(&img, 90).unwrap()
    }

    #[test]
    fn test_run_uses_default_filename() {
        let bytes = jpeg_bytes(16, 16);
        let result = run(&bytes, None, &CompressionParameters::new()).unwrap();
        assert_eq!(result.filename(), "image_compressed.jpg");

        let result = run(&bytes, Some("   "), &CompressionParameters::new()).unwrap();
        assert_eq!(result.filename(), "image_compressed.jpg");
    }

    #[test]
    fn test_run_keeps_supplied_filename() {
        let bytes = jpeg_bytes(16, 16);
        let result = run(&bytes, Some("holiday.png"), &CompressionParameters::new()).unwrap();
        assert_eq!(result.filename(), "holiday_compressed.jpg");
        assert_eq!((result.width(), result.height()), (16, 16));
        assert_eq!(result.quality(), 95);
        assert_eq!(result.attempts(), 1);
        assert_eq!(result.byte_length(), result.bytes().len());
    }

    #[test]
    fn test_run_passes_filename_through_untrimmed() {
        let bytes = jpeg_bytes(16, 16);
        let result = run(&bytes, Some(" a.png"), &CompressionParameters::new()).unwrap();
        assert_eq!(result.filename(), " a_compressed.jpg");
    }

    #[test]
    fn test_error_payload_kinds() {
        let err = run(b"not an image", Some("a.png"), &CompressionParameters::new()).unwrap_err();
        let payload = ErrorPayload::from_error(&err);
        assert_eq!(payload.kind, ErrorKind::InvalidInput);

        let err = CompressError::from(ParameterError::ZeroMaxSize);
        let payload = ErrorPayload::from_error(&err);
        assert_eq!(payload.kind, ErrorKind::InvalidParameters);
        assert_eq!(payload.message, "Invalid parameters: max_size_kb must be greater than zero");
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_image_throws_with_kind() {
        let err = compress_image(b"garbage", Some("x.png".to_string())).err().unwrap();
        let kind = js_sys::Reflect::get(&err, &JsValue::from_str("kind")).unwrap();
        assert_eq!(kind.as_string().as_deref(), Some("invalid_input"));
    }

    #[wasm_bindgen_test]
    fn test_compress_image_with_options_rejects_bad_options() {
        let mut options = JsCompressionOptions::new();
        options.set_max_dimension(0);
        let err = compress_image_with_options(&[0xFF, 0xD8], None, &options).err().unwrap();
        let kind = js_sys::Reflect::get(&err, &JsValue::from_str("kind")).unwrap();
        assert_eq!(kind.as_string().as_deref(), Some("invalid_parameters"));
    }
}
