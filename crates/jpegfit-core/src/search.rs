//! Size-constrained compression search.
//!
//! The search walks two monotonic axes: JPEG quality, lowered in fixed steps
//! within a round, and pixel dimensions, shrunk between rounds. Each step is an
//! explicit [`SearchState`] and the transition out of it depends only on that
//! state, the parameters and the size of the last encode.
//!
//! ```text
//!            encode at (quality, w x h)
//!                      |
//!          fits? ------+------ no
//!            |                  |
//!         Accept      quality - 5 >= min ? --- yes --> LowerQuality
//!                               |
//!                               no
//!                               |
//!                 larger side <= 500 ? --- yes --> Exhausted
//!                               |
//!                               no --> Shrink to 80%, quality = start
//! ```

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::decode::{resize, scale_dimensions, FilterType};
use crate::encode::encode_jpeg;
use crate::error::CompressError;
use crate::params::CompressionParameters;

/// Quality decrement between attempts within a round.
pub const QUALITY_STEP: u8 = 5;
/// Shrink factor numerator (80%).
pub const SHRINK_NUMERATOR: u32 = 4;
/// Shrink factor denominator (80%).
pub const SHRINK_DENOMINATOR: u32 = 5;
/// Larger side at or below which the search gives up instead of shrinking.
pub const DIMENSION_FLOOR: u32 = 500;
/// Resampling filter used for shrink rounds.
pub const SHRINK_FILTER: FilterType = FilterType::Lanczos3;

/// One point in the search: the quality and dimensions of the next encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    /// Number of shrink rounds completed so far.
    pub round: u32,
}

/// Transition out of a [`SearchState`] after an encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The encode fit the budget; the search is done.
    Accept,
    /// Try again at lower quality, same dimensions.
    LowerQuality(SearchState),
    /// Quality exhausted; shrink and restart at the start quality.
    Shrink(SearchState),
    /// Quality exhausted at or below the dimension floor.
    Exhausted,
}

impl SearchState {
    /// First state of a search over an image of the given dimensions.
    pub fn initial(width: u32, height: u32, params: &CompressionParameters) -> Self {
        Self {
            quality: params.start_quality,
            width,
            height,
            round: 0,
        }
    }

    #[inline]
    pub fn larger_side(&self) -> u32 {
        self.width.max(self.height)
    }

    /// Decide the next step given the byte length of the encode at this state.
    pub fn advance(&self, encoded_len: u64, params: &CompressionParameters) -> Step {
        if encoded_len <= params.max_bytes() {
            return Step::Accept;
        }

        if let Some(quality) = self.quality.checked_sub(QUALITY_STEP) {
            if quality >= params.min_quality {
                return Step::LowerQuality(Self { quality, ..*self });
            }
        }

        if self.larger_side() <= DIMENSION_FLOOR {
            return Step::Exhausted;
        }

        let (width, height) =
            scale_dimensions(self.width, self.height, SHRINK_NUMERATOR, SHRINK_DENOMINATOR);
        Step::Shrink(Self {
            quality: params.start_quality,
            width,
            height,
            round: self.round + 1,
        })
    }
}

/// Upper bound on encode attempts for a search starting at `larger_side`.
pub fn max_attempts(params: &CompressionParameters, larger_side: u32) -> usize {
    let per_round = params.start_quality.saturating_sub(params.min_quality) / QUALITY_STEP + 1;

    let mut rounds = 1usize;
    let mut side = larger_side;
    while side > DIMENSION_FLOOR {
        side = scale_dimensions(side, side, SHRINK_NUMERATOR, SHRINK_DENOMINATOR).0;
        rounds += 1;
    }
    per_round as usize * rounds
}

/// Record of one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeAttempt {
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    /// Encoded size in bytes.
    pub bytes: u64,
}

/// Every encode attempt of one search, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionReport {
    pub attempts: Vec<EncodeAttempt>,
}

impl CompressionReport {
    /// Number of encodes performed.
    pub fn encode_count(&self) -> usize {
        self.attempts.len()
    }

    /// Number of shrink rounds performed.
    pub fn shrink_rounds(&self) -> usize {
        self.attempts
            .windows(2)
            .filter(|pair| (pair[1].width, pair[1].height) != (pair[0].width, pair[0].height))
            .count()
    }

    /// Smallest encode seen, if any.
    pub fn smallest(&self) -> Option<&EncodeAttempt> {
        self.attempts.iter().min_by_key(|attempt| attempt.bytes)
    }
}

/// Successful result of [`compress_to_target`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// JPEG bytes within the budget.
    pub bytes: Vec<u8>,
    pub quality: u8,
    pub width: u32,
    pub height: u32,
    pub report: CompressionReport,
}

/// Run the search over an opaque, already dimension-bounded image.
///
/// Encodes at the start quality first and returns the first buffer that fits
/// `params.max_bytes()`. Parameters are assumed valid.
///
/// # Errors
///
/// * `CompressError::Unsatisfiable` when quality is exhausted at or below
///   [`DIMENSION_FLOOR`]
/// * `CompressError::Encode` if the encoder fails
pub fn compress_to_target(
    image: RgbImage,
    params: &CompressionParameters,
) -> Result<SearchOutcome, CompressError> {
    let mut image = image;
    let mut state = SearchState::initial(image.width(), image.height(), params);
    let mut report = CompressionReport::default();
    let bound = max_attempts(params, state.larger_side());

    loop {
        let bytes = encode_jpeg(&image, state.quality)?;
        let len = bytes.len() as u64;
        report.attempts.push(EncodeAttempt {
            quality: state.quality,
            width: state.width,
            height: state.height,
            bytes: len,
        });
        debug_assert!(report.encode_count() <= bound);

        log::debug!(
            "attempt {}: {}x{} q{} -> {} bytes (budget {})",
            report.encode_count(),
            state.width,
            state.height,
            state.quality,
            len,
            params.max_bytes()
        );

        match state.advance(len, params) {
            Step::Accept => {
                log::info!(
                    "compressed to {} bytes at {}x{} q{} after {} attempts",
                    len,
                    state.width,
                    state.height,
                    state.quality,
                    report.encode_count()
                );
                return Ok(SearchOutcome {
                    bytes,
                    quality: state.quality,
                    width: state.width,
                    height: state.height,
                    report,
                });
            }
            Step::LowerQuality(next) => state = next,
            Step::Shrink(next) => {
                log::debug!(
                    "quality exhausted, shrinking {}x{} to {}x{}",
                    state.width,
                    state.height,
                    next.width,
                    next.height
                );
                image = resize(&image, next.width, next.height, SHRINK_FILTER);
                state = next;
            }
            Step::Exhausted => {
                let smallest_bytes = report.smallest().map_or(len, |attempt| attempt.bytes);
                log::warn!(
                    "cannot reach {} bytes: smallest attempt {} bytes at {}x{}",
                    params.max_bytes(),
                    smallest_bytes,
                    state.width,
                    state.height
                );
                return Err(CompressError::Unsatisfiable {
                    max_size_kb: params.max_size_kb,
                    smallest_bytes,
                    width: state.width,
                    height: state.height,
                });
            }
        }
    }
}
