//! MarkerValidator: runs every applicable check over a batch and collects
//! the findings.

use transrapport_core::constants::DEFAULT_CONFIDENCE_THRESHOLD;
use transrapport_core::{AnalysisConfig, MarkerEvent, Provenance, RapportIndicator};

use crate::checks::{batch, marker, rapport};
use crate::report::ValidationReport;

/// Configuration for the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorConfig {
    /// Markers below this confidence are reported.
    pub confidence_threshold: f64,
    /// Expected provenance on every marker.
    pub provenance: Provenance,
    /// Also require explanations, category-consistent subtypes, time order,
    /// and no same-speaker overlap.
    pub strict: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            provenance: Provenance::default(),
            strict: false,
        }
    }
}

impl ValidatorConfig {
    pub fn from_analysis(config: &AnalysisConfig, strict: bool) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            provenance: config.provenance(),
            strict,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkerValidator {
    config: ValidatorConfig,
}

impl MarkerValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a marker batch.
    pub fn validate_markers(&self, markers: &[MarkerEvent]) -> ValidationReport {
        let mut errors = Vec::new();
        for m in markers {
            errors.extend(marker::provenance(m, &self.config.provenance));
            errors.extend(marker::confidence(m, self.config.confidence_threshold));
            errors.extend(marker::time_range(m));
            errors.extend(marker::evidence(m));
            if self.config.strict {
                errors.extend(marker::strict_fields(m));
            }
        }
        if self.config.strict && markers.len() > 1 {
            errors.extend(batch::ordering(markers));
            errors.extend(batch::speaker_overlaps(markers));
        }

        let report = ValidationReport {
            checked_markers: markers.len(),
            checked_indicators: 0,
            errors,
        };
        log_outcome(&report, self.config.strict);
        report
    }

    /// Validate a rapport timeline against the markers it was derived from.
    pub fn validate_rapport(
        &self,
        indicators: &[RapportIndicator],
        markers: &[MarkerEvent],
    ) -> ValidationReport {
        let mut errors: Vec<_> = indicators.iter().flat_map(rapport::bounds).collect();
        errors.extend(rapport::ordering(indicators));
        errors.extend(rapport::contributors(indicators, markers));

        let report = ValidationReport {
            checked_markers: 0,
            checked_indicators: indicators.len(),
            errors,
        };
        log_outcome(&report, self.config.strict);
        report
    }

    /// Markers and rapport together.
    pub fn validate(
        &self,
        markers: &[MarkerEvent],
        indicators: &[RapportIndicator],
    ) -> ValidationReport {
        let mut report = self.validate_markers(markers);
        report.merge(self.validate_rapport(indicators, markers));
        report
    }
}

fn log_outcome(report: &ValidationReport, strict: bool) {
    if report.is_valid() {
        tracing::info!(
            markers = report.checked_markers,
            indicators = report.checked_indicators,
            strict,
            "validation passed"
        );
    } else {
        tracing::warn!(
            markers = report.checked_markers,
            indicators = report.checked_indicators,
            errors = report.errors.len(),
            strict,
            "validation failed"
        );
    }
}
