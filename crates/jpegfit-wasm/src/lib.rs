//! jpegfit WASM - WebAssembly bindings for jpegfit
//!
//! This crate exposes the jpegfit-core compressor to JavaScript/TypeScript.
//! It replaces an upload route: the caller hands over file bytes and a
//! filename, and receives a JPEG within the budget plus a download name.
//!
//! # Module Structure
//!
//! - `compress` - The compression entry points and result type
//! - `options` - WASM-compatible wrapper for compression parameters
//! - `logger` - Browser console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_image } from '@jpegfit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_image(bytes, file.name);
//! console.log(`${result.filename}: ${result.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod logger;
mod options;

// Re-export public types
pub use compress::{compress_image, compress_image_with_options, JsCompressedImage};
pub use options::JsCompressionOptions;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Warn);
}

/// Set console log verbosity: "off", "error", "warn", "info", "debug" or "trace"
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::parse_level(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
