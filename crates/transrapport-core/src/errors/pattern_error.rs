//! Pattern registry errors and recoverable load warnings.

use serde::Serialize;

use super::error_code::{self, TransrapportErrorCode};

/// Errors that can occur while loading detection patterns.
///
/// `Parse` and `Io` concern a whole pattern source and are returned to the
/// caller. Every other variant concerns a single rule; the registry skips
/// that rule and records a [`PatternWarning`] instead.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("Pattern source {source_name} failed to parse: {message}")]
    Parse { source_name: String, message: String },

    #[error("Failed to read pattern file {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid regex in pattern '{pattern_id}': {message}")]
    InvalidRegex { pattern_id: String, message: String },

    #[error("Unknown category '{category}' in pattern '{pattern_id}'")]
    UnknownCategory { pattern_id: String, category: String },

    #[error("Unknown subtype '{subtype}' in pattern '{pattern_id}'")]
    UnknownSubtype { pattern_id: String, subtype: String },

    #[error("Subtype '{subtype}' does not belong to category '{category}' in pattern '{pattern_id}'")]
    SubtypeCategoryMismatch {
        pattern_id: String,
        subtype: String,
        category: String,
    },

    #[error("Unknown context requirement '{requirement}' in pattern '{pattern_id}'")]
    UnknownRequirement {
        pattern_id: String,
        requirement: String,
    },

    #[error("Weight {weight} outside [0.0, 1.0] in pattern '{pattern_id}'")]
    InvalidWeight { pattern_id: String, weight: f64 },

    #[error("Pattern '{pattern_id}' has neither keywords nor regexes")]
    EmptyPattern { pattern_id: String },

    #[error("Keyword index for pattern '{pattern_id}' failed to build: {message}")]
    KeywordIndex { pattern_id: String, message: String },
}

impl PatternError {
    /// The offending pattern id, for per-rule errors.
    pub fn pattern_id(&self) -> Option<&str> {
        match self {
            Self::Parse { .. } | Self::Io { .. } => None,
            Self::InvalidRegex { pattern_id, .. }
            | Self::UnknownCategory { pattern_id, .. }
            | Self::UnknownSubtype { pattern_id, .. }
            | Self::SubtypeCategoryMismatch { pattern_id, .. }
            | Self::UnknownRequirement { pattern_id, .. }
            | Self::InvalidWeight { pattern_id, .. }
            | Self::EmptyPattern { pattern_id }
            | Self::KeywordIndex { pattern_id, .. } => Some(pattern_id),
        }
    }
}

impl TransrapportErrorCode for PatternError {
    fn error_code(&self) -> &'static str {
        error_code::PATTERN_ERROR
    }
}

/// A malformed rule that was skipped during registry load. Never fatal.
#[derive(Debug, Clone, Serialize)]
pub struct PatternWarning {
    /// Where the rule came from (file path or `builtin:<category>`).
    pub source_name: String,
    pub pattern_id: String,
    pub message: String,
}

impl PatternWarning {
    pub fn from_error(source_name: &str, error: &PatternError) -> Self {
        Self {
            source_name: source_name.to_string(),
            pattern_id: error.pattern_id().unwrap_or("<unknown>").to_string(),
            message: error.to_string(),
        }
    }
}
