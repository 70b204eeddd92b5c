//! Configuration errors.

use super::error_code::{self, TransrapportErrorCode};

/// Errors that can occur during configuration loading and validation.
/// Always fatal: the pipeline refuses to construct.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Config validation failed for {field}: {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Category {category} is enabled but has no usable patterns")]
    EmptyPatternSet { category: String },
}

impl TransrapportErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
