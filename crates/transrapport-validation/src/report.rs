use serde::Serialize;

use transrapport_core::errors::TransrapportErrorCode;
use transrapport_core::ValidationError;

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub checked_markers: usize,
    pub checked_indicators: usize,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Human-readable messages, one per finding.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Messages prefixed with their error code.
    pub fn coded_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.coded_string()).collect()
    }

    /// `(is_valid, messages)`.
    pub fn into_tuple(self) -> (bool, Vec<String>) {
        (self.is_valid(), self.messages())
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.checked_markers += other.checked_markers;
        self.checked_indicators += other.checked_indicators;
        self.errors.extend(other.errors);
    }
}
