//! Per-call compression parameters.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default byte budget in kilobytes.
pub const DEFAULT_MAX_SIZE_KB: u32 = 400;
/// Default lowest quality the search may reach before shrinking.
pub const DEFAULT_MIN_QUALITY: u8 = 20;
/// Default bound on the larger side, applied before the search.
pub const DEFAULT_MAX_DIMENSION: u32 = 2000;
/// Default quality of the first encode attempt in each round.
pub const DEFAULT_START_QUALITY: u8 = 95;

/// Highest accepted `min_quality`.
pub const MAX_MIN_QUALITY: u8 = 95;
/// Highest quality the JPEG encoder accepts.
pub const MAX_QUALITY: u8 = 100;

/// Errors reported by [`CompressionParameters::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    #[error("max_size_kb must be greater than zero")]
    ZeroMaxSize,

    #[error("max_dimension must be greater than zero")]
    ZeroMaxDimension,

    #[error("min_quality must be between 1 and 95, got {0}")]
    MinQualityOutOfRange(u8),

    #[error("start_quality must be between 1 and 100, got {0}")]
    StartQualityOutOfRange(u8),

    #[error("start_quality ({start}) must not be below min_quality ({min})")]
    StartBelowMinQuality { start: u8, min: u8 },
}

/// Parameters for one compression call.
///
/// Immutable for the lifetime of a call. Construct with [`Default`] and the
/// `with_*` setters, or deserialize from a camelCase object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressionParameters {
    /// Output budget in kilobytes (1 KB = 1024 bytes).
    pub max_size_kb: u32,
    /// Lowest quality tried before a shrink round (1 to 95).
    pub min_quality: u8,
    /// Bound on the larger pixel side before the search starts.
    pub max_dimension: u32,
    /// Quality of the first attempt in every round (1 to 100).
    pub start_quality: u8,
}

impl Default for CompressionParameters {
    fn default() -> Self {
        Self {
            max_size_kb: DEFAULT_MAX_SIZE_KB,
            min_quality: DEFAULT_MIN_QUALITY,
            max_dimension: DEFAULT_MAX_DIMENSION,
            start_quality: DEFAULT_START_QUALITY,
        }
    }
}

impl CompressionParameters {
    /// Create parameters with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_size_kb(mut self, max_size_kb: u32) -> Self {
        self.max_size_kb = max_size_kb;
        self
    }

    pub fn with_min_quality(mut self, min_quality: u8) -> Self {
        self.min_quality = min_quality;
        self
    }

    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn with_start_quality(mut self, start_quality: u8) -> Self {
        self.start_quality = start_quality;
        self
    }

    /// Byte budget derived from `max_size_kb`.
    pub fn max_bytes(&self) -> u64 {
        self.max_size_kb as u64 * 1024
    }

    /// Reject parameter combinations the search cannot act on.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.max_size_kb == 0 {
            return Err(ParameterError::ZeroMaxSize);
        }
        if self.max_dimension == 0 {
            return Err(ParameterError::ZeroMaxDimension);
        }
        if !(1..=MAX_MIN_QUALITY).contains(&self.min_quality) {
            return Err(ParameterError::MinQualityOutOfRange(self.min_quality));
        }
        if !(1..=MAX_QUALITY).contains(&self.start_quality) {
            return Err(ParameterError::StartQualityOutOfRange(self.start_quality));
        }
        if self.start_quality < self.min_quality {
            return Err(ParameterError::StartBelowMinQuality {
                start: self.start_quality,
                min: self.min_quality,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_caller_contract() {
        let params = CompressionParameters::new();
        assert_eq!(params.max_size_kb, 400);
        assert_eq!(params.min_quality, 20);
        assert_eq!(params.max_dimension, 2000);
        assert_eq!(params.start_quality, 95);
        assert_eq!(params.max_bytes(), 400 * 1024);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_budget_rejected() {
        let params = CompressionParameters::new().with_max_size_kb(0);
        assert_eq!(params.validate(), Err(ParameterError::ZeroMaxSize));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let params = CompressionParameters::new().with_max_dimension(0);
        assert_eq!(params.validate(), Err(ParameterError::ZeroMaxDimension));
    }

    #[test]
    fn test_min_quality_range() {
        for bad in [0, 96, 255] {
            let params = CompressionParameters::new()
                .with_min_quality(bad)
                .with_start_quality(100);
            assert_eq!(params.validate(), Err(ParameterError::MinQualityOutOfRange(bad)));
        }
        for good in [1, 50, 95] {
            let params = CompressionParameters::new().with_min_quality(good);
            assert!(params.validate().is_ok());
        }
    }

    #[test]
    fn test_start_quality_range() {
        let params = CompressionParameters::new().with_start_quality(101);
        assert_eq!(params.validate(), Err(ParameterError::StartQualityOutOfRange(101)));

        let params = CompressionParameters::new()
            .with_min_quality(1)
            .with_start_quality(0);
        assert_eq!(params.validate(), Err(ParameterError::StartQualityOutOfRange(0)));
    }

    #[test]
    fn test_start_below_min_rejected() {
        let params = CompressionParameters::new()
            .with_min_quality(60)
            .with_start_quality(50);
        assert_eq!(
            params.validate(),
            Err(ParameterError::StartBelowMinQuality { start: 50, min: 60 })
        );
    }

    #[test]
    fn test_start_equal_to_min_allowed() {
        let params = CompressionParameters::new()
            .with_min_quality(40)
            .with_start_quality(40);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_max_bytes_does_not_overflow() {
        let params = CompressionParameters::new().with_max_size_kb(u32::MAX);
        assert_eq!(params.max_bytes(), u32::MAX as u64 * 1024);
    }
}
