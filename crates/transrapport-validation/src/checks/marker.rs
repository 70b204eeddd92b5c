//! Per-marker checks.

use transrapport_core::{MarkerEvent, Provenance, ValidationError};

pub fn confidence(marker: &MarkerEvent, threshold: f64) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !(0.0..=1.0).contains(&marker.confidence) {
        errors.push(ValidationError::ConfidenceOutOfRange {
            marker_id: marker.id.clone(),
            confidence: marker.confidence,
        });
    }
    if marker.confidence < threshold {
        errors.push(ValidationError::BelowThreshold {
            marker_id: marker.id.clone(),
            confidence: marker.confidence,
            threshold,
        });
    }
    errors
}

pub fn time_range(marker: &MarkerEvent) -> Option<ValidationError> {
    (marker.start_time > marker.end_time).then(|| ValidationError::InvertedTimeRange {
        marker_id: marker.id.clone(),
        start: marker.start_time,
        end: marker.end_time,
    })
}

pub fn evidence(marker: &MarkerEvent) -> Option<ValidationError> {
    marker.evidence.trim().is_empty().then(|| ValidationError::EmptyEvidence {
        marker_id: marker.id.clone(),
    })
}

pub fn provenance(marker: &MarkerEvent, expected: &Provenance) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if marker.provenance.source != expected.source {
        errors.push(ValidationError::ProvenanceSourceMismatch {
            marker_id: marker.id.clone(),
            found: marker.provenance.source.clone(),
        });
    }
    if marker.provenance.method != expected.method {
        errors.push(ValidationError::AnalysisMethodMismatch {
            marker_id: marker.id.clone(),
            found: marker.provenance.method.clone(),
        });
    }
    errors
}

/// Strict mode: explanation present and subtype bound to the category.
pub fn strict_fields(marker: &MarkerEvent) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if marker.explanation.trim().is_empty() {
        errors.push(ValidationError::MissingExplanation {
            marker_id: marker.id.clone(),
        });
    }
    if marker.subtype.category() != marker.category {
        errors.push(ValidationError::SubtypeCategoryMismatch {
            marker_id: marker.id.clone(),
            subtype: marker.subtype.as_str().to_string(),
            category: marker.category.as_str().to_string(),
        });
    }
    errors
}
