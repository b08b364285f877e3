use std::time::Duration;

use thiserror::Error;

use crate::models::Denomination;

/// Failures talking to the recognition service
#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("recognizer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("recognizer responded with HTTP {0}")]
    Status(u16),

    #[error("malformed recognizer response: {0}")]
    Malformed(String),

    #[error("failed to encode frame: {0}")]
    Encoding(String),
}

/// Why a cycle ended without touching the ledger.
///
/// None of these are failures; the session stays usable and the next cycle
/// may start immediately.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RejectReason {
    #[error("no note detected")]
    NoDetectionFound,

    #[error("confidence {confidence:.2} is below threshold {threshold:.2}")]
    LowConfidence { confidence: f32, threshold: f32 },

    #[error("{denomination} seen again after {}ms (cooldown {}ms)", .elapsed.as_millis(), .cooldown.as_millis())]
    DuplicateWithinCooldown {
        denomination: Denomination,
        elapsed: Duration,
        cooldown: Duration,
    },
}

impl RejectReason {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::NoDetectionFound => "NO_DETECTION_FOUND",
            RejectReason::LowConfidence { .. } => "LOW_CONFIDENCE",
            RejectReason::DuplicateWithinCooldown { .. } => "DUPLICATE_WITHIN_COOLDOWN",
        }
    }
}

/// Errors that abort a detection cycle
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("recognition unavailable: {0}")]
    RecognitionUnavailable(#[from] RecognizerError),

    #[error("a detection cycle is already in flight")]
    CycleInFlight,
}

impl CycleError {
    pub fn code(&self) -> &'static str {
        match self {
            CycleError::RecognitionUnavailable(_) => "RECOGNITION_UNAVAILABLE",
            CycleError::CycleInFlight => "CYCLE_IN_FLIGHT",
        }
    }
}
