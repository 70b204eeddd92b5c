//! Tests for the error enums and their caller-facing codes.

use transrapport_core::errors::error_code::{self, TransrapportErrorCode};
use transrapport_core::errors::*;

#[test]
fn every_error_enum_has_a_code() {
    let config = ConfigError::EmptyPatternSet {
        category: "memory".into(),
    };
    assert_eq!(config.error_code(), error_code::CONFIG_ERROR);

    let pattern = PatternError::EmptyPattern {
        pattern_id: "p".into(),
    };
    assert_eq!(pattern.error_code(), error_code::PATTERN_ERROR);

    let model = ModelError::EmptyEvidence;
    assert_eq!(model.error_code(), error_code::MODEL_ERROR);

    let validation = ValidationError::EmptyEvidence {
        marker_id: "m".into(),
    };
    assert_eq!(validation.error_code(), error_code::VALIDATION_ERROR);

    assert_eq!(PipelineError::Cancelled.error_code(), error_code::CANCELLED);
}

#[test]
fn pipeline_error_delegates_to_inner_code() {
    let err: PipelineError = ConfigError::ValidationFailed {
        field: "smoothing_factor".into(),
        message: "bad".into(),
    }
    .into();
    assert_eq!(err.error_code(), error_code::CONFIG_ERROR);
    assert!(err.coded_string().starts_with("[CONFIG_ERROR]"));
}

#[test]
fn pattern_warning_carries_rule_id() {
    let err = PatternError::InvalidRegex {
        pattern_id: "broken_rule".into(),
        message: "unclosed group".into(),
    };
    let warning = PatternWarning::from_error("builtin:attention", &err);
    assert_eq!(warning.pattern_id, "broken_rule");
    assert_eq!(warning.source_name, "builtin:attention");
    assert!(warning.message.contains("unclosed group"));

    let whole_file = PatternError::Parse {
        source_name: "x.toml".into(),
        message: "eof".into(),
    };
    assert_eq!(whole_file.pattern_id(), None);
}

#[test]
fn validation_error_serializes_with_kind_tag() {
    let err = ValidationError::BelowThreshold {
        marker_id: "marker-1".into(),
        confidence: 0.4,
        threshold: 0.7,
    };
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"], "below_threshold");
    assert_eq!(json["marker_id"], "marker-1");
}
