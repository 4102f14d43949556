//! Compression options WASM bindings.
//!
//! This module provides a JavaScript wrapper for `CompressionParameters`,
//! allowing the byte budget and quality floor to be set from TypeScript.

use jpegfit_core::CompressionParameters;
use wasm_bindgen::prelude::*;

/// Compression options wrapper for JavaScript
#[wasm_bindgen]
pub struct JsCompressionOptions {
    inner: CompressionParameters,
}

#[wasm_bindgen]
impl JsCompressionOptions {
    /// Create options with default values (400 KB, min quality 20, 2000px, start quality 95)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: CompressionParameters::new(),
        }
    }

    /// Get the output budget in kilobytes
    #[wasm_bindgen(getter)]
    pub fn max_size_kb(&self) -> u32 {
        self.inner.max_size_kb
    }

    /// Set the output budget in kilobytes
    #[wasm_bindgen(setter)]
    pub fn set_max_size_kb(&mut self, value: u32) {
        self.inner.max_size_kb = value;
    }

    /// Get the lowest quality tried before shrinking
    #[wasm_bindgen(getter)]
    pub fn min_quality(&self) -> u8 {
        self.inner.min_quality
    }

    /// Set the lowest quality tried before shrinking
    #[wasm_bindgen(setter)]
    pub fn set_min_quality(&mut self, value: u8) {
        self.inner.min_quality = value;
    }

    /// Get the bound on the larger side
    #[wasm_bindgen(getter)]
    pub fn max_dimension(&self) -> u32 {
        self.inner.max_dimension
    }

    /// Set the bound on the larger side
    #[wasm_bindgen(setter)]
    pub fn set_max_dimension(&mut self, value: u32) {
        self.inner.max_dimension = value;
    }

    /// Get the quality of the first attempt in each round
    #[wasm_bindgen(getter)]
    pub fn start_quality(&self) -> u8 {
        self.inner.start_quality
    }

    /// Set the quality of the first attempt in each round
    #[wasm_bindgen(setter)]
    pub fn set_start_quality(&mut self, value: u8) {
        self.inner.start_quality = value;
    }

    /// Serialize to a plain object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain object; missing fields take their defaults
    pub fn from_json(value: JsValue) -> Result<JsCompressionOptions, JsValue> {
        let inner: CompressionParameters =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for JsCompressionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl JsCompressionOptions {
    pub(crate) fn inner(&self) -> &CompressionParameters {
        &self.inner
    }
}
