//! Smart-constructor failures for the value types.

use super::error_code::{self, TransrapportErrorCode};

/// Raised when a marker or rapport indicator would violate its invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("confidence {value} outside [0.0, 1.0]")]
    ConfidenceOutOfRange { value: f64 },

    #[error("inverted time range: start {start} > end {end}")]
    InvertedTimeRange { start: f64, end: f64 },

    #[error("negative or non-finite time: {value}")]
    NegativeTime { value: f64 },

    #[error("evidence text is empty")]
    EmptyEvidence,

    #[error("rapport value {value} outside [-1.0, 1.0]")]
    RapportValueOutOfRange { value: f64 },

    #[error("unknown rapport trend: {value}")]
    UnknownTrend { value: String },
}

impl TransrapportErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
