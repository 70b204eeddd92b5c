//! Pipeline errors.

use super::error_code::{self, TransrapportErrorCode};
use super::{ConfigError, ModelError, PatternError};

/// Errors that can occur while constructing or running the pipeline.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Pattern error: {0}")]
    Pattern(#[from] PatternError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl TransrapportErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Pattern(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}
