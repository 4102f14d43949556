//! Error type returned by the compression entry points.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::params::ParameterError;

/// Failure of a compression call.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Parameters were rejected before any work started.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    /// The input bytes are not a decodable image.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The encoder failed on an opaque image.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Quality and dimensions were exhausted without meeting the budget.
    #[error(
        "Cannot compress image below {max_size_kb}KB while maintaining acceptable quality \
         (smallest attempt was {smallest_bytes} bytes at {width}x{height})"
    )]
    Unsatisfiable {
        max_size_kb: u32,
        smallest_bytes: u64,
        width: u32,
        height: u32,
    },
}

/// Coarse classification of a [`CompressError`] for transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The caller sent something that is not an image.
    InvalidInput,
    /// The caller sent parameters outside their accepted ranges.
    InvalidParameters,
    /// The image is valid but cannot meet the requested budget.
    Unsatisfiable,
    /// The encoder failed; not caused by the caller.
    Internal,
}

impl ErrorKind {
    /// Stable identifier used across the WASM boundary.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::InvalidParameters => "invalid_parameters",
            ErrorKind::Unsatisfiable => "unsatisfiable",
            ErrorKind::Internal => "internal",
        }
    }

    /// Whether the caller can fix the failure by changing the request.
    pub fn is_client_error(self) -> bool {
        !matches!(self, ErrorKind::Internal)
    }
}

impl CompressError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompressError::InvalidParameters(_) => ErrorKind::InvalidParameters,
            CompressError::Decode(_) => ErrorKind::InvalidInput,
            CompressError::Encode(_) => ErrorKind::Internal,
            CompressError::Unsatisfiable { .. } => ErrorKind::Unsatisfiable,
        }
    }
}
