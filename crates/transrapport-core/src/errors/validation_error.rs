//! Batch-level validation findings.

use serde::Serialize;

use super::error_code::{self, TransrapportErrorCode};

/// An invariant violated by a marker or rapport batch.
///
/// Advisory: the validator collects these and never mutates or drops markers.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Marker {marker_id} below confidence threshold: {confidence:.3} < {threshold}")]
    BelowThreshold {
        marker_id: String,
        confidence: f64,
        threshold: f64,
    },

    #[error("Marker {marker_id} has confidence {confidence} outside [0.0, 1.0]")]
    ConfidenceOutOfRange { marker_id: String, confidence: f64 },

    #[error("Marker {marker_id} has invalid time range: {start} > {end}")]
    InvertedTimeRange {
        marker_id: String,
        start: f64,
        end: f64,
    },

    #[error("Marker {marker_id} has empty evidence")]
    EmptyEvidence { marker_id: String },

    #[error("Marker {marker_id} has incorrect provenance source: {found}")]
    ProvenanceSourceMismatch { marker_id: String, found: String },

    #[error("Marker {marker_id} has incorrect analysis method: {found}")]
    AnalysisMethodMismatch { marker_id: String, found: String },

    #[error("Marker {marker_id} missing explanation (strict mode)")]
    MissingExplanation { marker_id: String },

    #[error("Marker {marker_id} subtype {subtype} does not belong to category {category} (strict mode)")]
    SubtypeCategoryMismatch {
        marker_id: String,
        subtype: String,
        category: String,
    },

    #[error("Temporal overlap detected between markers {first_id} and {second_id} for same speaker")]
    SpeakerOverlap { first_id: String, second_id: String },

    #[error("Markers out of time order at {marker_id}")]
    MarkerOrder { marker_id: String },

    #[error("Rapport indicator at {timestamp} has value {value} outside [-1.0, 1.0]")]
    RapportValueOutOfRange { timestamp: f64, value: f64 },

    #[error("Rapport indicator at {timestamp} has confidence {confidence} outside [0.0, 1.0]")]
    RapportConfidenceOutOfRange { timestamp: f64, confidence: f64 },

    #[error("Rapport indicators out of time order at {timestamp}")]
    RapportOrder { timestamp: f64 },

    #[error("Rapport indicator at {timestamp} references unknown marker {marker_id}")]
    UnknownContributor { timestamp: f64, marker_id: String },
}

impl TransrapportErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
