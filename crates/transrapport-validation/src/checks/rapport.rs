//! Checks over a rapport timeline.

use std::collections::BTreeSet;

use transrapport_core::{MarkerEvent, RapportIndicator, ValidationError};

pub fn bounds(indicator: &RapportIndicator) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !(-1.0..=1.0).contains(&indicator.value) {
        errors.push(ValidationError::RapportValueOutOfRange {
            timestamp: indicator.timestamp,
            value: indicator.value,
        });
    }
    if !(0.0..=1.0).contains(&indicator.confidence) {
        errors.push(ValidationError::RapportConfidenceOutOfRange {
            timestamp: indicator.timestamp,
            confidence: indicator.confidence,
        });
    }
    errors
}

pub fn ordering(indicators: &[RapportIndicator]) -> Vec<ValidationError> {
    indicators
        .windows(2)
        .filter(|pair| pair[1].timestamp < pair[0].timestamp)
        .map(|pair| ValidationError::RapportOrder {
            timestamp: pair[1].timestamp,
        })
        .collect()
}

/// Contributing ids that name no marker in `markers`.
pub fn contributors(indicators: &[RapportIndicator], markers: &[MarkerEvent]) -> Vec<ValidationError> {
    let known: BTreeSet<&str> = markers.iter().map(|m| m.id.as_str()).collect();
    let mut errors = Vec::new();
    for indicator in indicators {
        for id in &indicator.contributing_markers {
            if !known.contains(id.as_str()) {
                errors.push(ValidationError::UnknownContributor {
                    timestamp: indicator.timestamp,
                    marker_id: id.clone(),
                });
            }
        }
    }
    errors
}
