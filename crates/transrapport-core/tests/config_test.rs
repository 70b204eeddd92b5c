//! Tests for layered analysis configuration.

use std::io::Write;
use std::sync::Mutex;

use transrapport_core::config::{AnalysisConfig, ConfigOverrides};
use transrapport_core::errors::ConfigError;
use transrapport_core::MarkerCategory;

/// Serializes tests that touch `TRANSRAPPORT_*` environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn defaults_match_documented_values() {
    let config = AnalysisConfig::default();
    assert_eq!(config.confidence_threshold, 0.7);
    assert_eq!(config.calculation_window_seconds, 60.0);
    assert_eq!(config.smoothing_factor, 0.3);
    assert!(config.enable_rapport);
    assert!(config.collect_context);
    assert_eq!(config.enabled_categories(), MarkerCategory::ALL.to_vec());
    assert_eq!(config.provenance().source, "LD-3.4-constitution");
    assert_eq!(config.provenance().method, "LD-3.4");
    config.validate().unwrap();
}

#[test]
fn partial_toml_keeps_defaults() {
    let config = AnalysisConfig::from_toml(
        r#"
        confidence_threshold = 0.5
        enable_memory = false
        "#,
    )
    .unwrap();
    assert_eq!(config.confidence_threshold, 0.5);
    assert!(!config.enable_memory);
    assert!(config.enable_attention);
    assert_eq!(config.smoothing_factor, 0.3);
    assert_eq!(
        config.enabled_categories(),
        vec![
            MarkerCategory::Attention,
            MarkerCategory::Semantic,
            MarkerCategory::Cluster
        ]
    );
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = AnalysisConfig::from_toml("confidence_threshold = [").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn threshold_out_of_range_fails_validation() {
    let config = AnalysisConfig {
        confidence_threshold: 1.2,
        ..Default::default()
    };
    match config.validate() {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "confidence_threshold")
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn non_positive_window_fails_validation() {
    let config = AnalysisConfig {
        calculation_window_seconds: 0.0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn sub_second_window_fails_validation() {
    for window in [1e-9, 0.5] {
        let config = AnalysisConfig {
            calculation_window_seconds: window,
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert_eq!(field, "calculation_window_seconds")
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }
    let one_second = AnalysisConfig {
        calculation_window_seconds: 1.0,
        ..Default::default()
    };
    assert!(one_second.validate().is_ok());
}

#[test]
fn missing_file_is_reported() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let err = AnalysisConfig::load(
        Some(std::path::Path::new("/definitely/not/here.toml")),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn file_then_env_then_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "confidence_threshold = 0.6\nsmoothing_factor = 0.4").unwrap();

    std::env::set_var("TRANSRAPPORT_SMOOTHING_FACTOR", "0.2");
    std::env::set_var("TRANSRAPPORT_WINDOW_SECONDS", "not-a-number");
    let overrides = ConfigOverrides {
        calculation_window_seconds: Some(30.0),
        categories: Some(vec![MarkerCategory::Semantic]),
        ..Default::default()
    };
    let config = AnalysisConfig::load(Some(file.path()), Some(&overrides));
    std::env::remove_var("TRANSRAPPORT_SMOOTHING_FACTOR");
    std::env::remove_var("TRANSRAPPORT_WINDOW_SECONDS");

    let config = config.unwrap();
    assert_eq!(config.confidence_threshold, 0.6);
    assert_eq!(config.smoothing_factor, 0.2);
    assert_eq!(config.calculation_window_seconds, 30.0);
    assert_eq!(config.enabled_categories(), vec![MarkerCategory::Semantic]);
}

#[test]
fn invalid_override_rejected_by_load() {
    let _lock = ENV_MUTEX.lock().unwrap();
    let overrides = ConfigOverrides {
        smoothing_factor: Some(-0.1),
        ..Default::default()
    };
    assert!(AnalysisConfig::load(None, Some(&overrides)).is_err());
}
