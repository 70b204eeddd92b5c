//! Analysis configuration consumed at pipeline construction.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::errors::ConfigError;
use crate::models::{MarkerCategory, Provenance};

/// Configuration for one pipeline instance.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`TRANSRAPPORT_*`)
/// 3. TOML file passed to `load`
/// 4. Compiled defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Minimum confidence for a marker to be emitted. Default: 0.7.
    pub confidence_threshold: f64,
    pub enable_attention: bool,
    pub enable_semantic: bool,
    pub enable_cluster: bool,
    pub enable_memory: bool,
    /// Derive a rapport timeline from the merged markers. Default: true.
    pub enable_rapport: bool,
    /// Rapport calculation window in seconds. Default: 60.
    pub calculation_window_seconds: f64,
    /// Exponential smoothing factor for rapport samples. Default: 0.3.
    pub smoothing_factor: f64,
    pub provenance_source: String,
    pub analysis_method: String,
    /// Attach neighbouring segment text to each marker. Default: true.
    pub collect_context: bool,
    /// Directory of `*.toml` pattern files replacing the built-in registry.
    pub patterns_dir: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: constants::DEFAULT_CONFIDENCE_THRESHOLD,
            enable_attention: true,
            enable_semantic: true,
            enable_cluster: true,
            enable_memory: true,
            enable_rapport: true,
            calculation_window_seconds: constants::DEFAULT_WINDOW_SECONDS,
            smoothing_factor: constants::DEFAULT_SMOOTHING_FACTOR,
            provenance_source: constants::DEFAULT_PROVENANCE_SOURCE.to_string(),
            analysis_method: constants::DEFAULT_ANALYSIS_METHOD.to_string(),
            collect_context: true,
            patterns_dir: None,
        }
    }
}

/// Explicit override values, e.g. from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub confidence_threshold: Option<f64>,
    pub smoothing_factor: Option<f64>,
    pub calculation_window_seconds: Option<f64>,
    pub enable_rapport: Option<bool>,
    pub categories: Option<Vec<MarkerCategory>>,
}

impl AnalysisConfig {
    /// Load configuration with layered resolution, then validate.
    pub fn load(path: Option<&Path>, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };

        config.apply_env_overrides();

        if let Some(o) = overrides {
            config.apply_overrides(o);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string. Unknown keys are ignored.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `TRANSRAPPORT_*` environment variables. Unparseable values are
    /// logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(v) = env_parse::<f64>("TRANSRAPPORT_CONFIDENCE_THRESHOLD") {
            self.confidence_threshold = v;
        }
        if let Some(v) = env_parse::<f64>("TRANSRAPPORT_SMOOTHING_FACTOR") {
            self.smoothing_factor = v;
        }
        if let Some(v) = env_parse::<f64>("TRANSRAPPORT_WINDOW_SECONDS") {
            self.calculation_window_seconds = v;
        }
        if let Some(v) = env_parse::<bool>("TRANSRAPPORT_ENABLE_RAPPORT") {
            self.enable_rapport = v;
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.confidence_threshold {
            self.confidence_threshold = v;
        }
        if let Some(v) = overrides.smoothing_factor {
            self.smoothing_factor = v;
        }
        if let Some(v) = overrides.calculation_window_seconds {
            self.calculation_window_seconds = v;
        }
        if let Some(v) = overrides.enable_rapport {
            self.enable_rapport = v;
        }
        if let Some(ref categories) = overrides.categories {
            for category in MarkerCategory::ALL {
                self.set_category_enabled(category, categories.contains(&category));
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "confidence_threshold".to_string(),
                message: format!("{} must be between 0.0 and 1.0", self.confidence_threshold),
            });
        }
        if !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(ConfigError::ValidationFailed {
                field: "smoothing_factor".to_string(),
                message: format!("{} must be between 0.0 and 1.0", self.smoothing_factor),
            });
        }
        if !self.calculation_window_seconds.is_finite()
            || self.calculation_window_seconds < constants::MIN_WINDOW_SECONDS
        {
            return Err(ConfigError::ValidationFailed {
                field: "calculation_window_seconds".to_string(),
                message: format!(
                    "{} must be a finite number of seconds, at least {}",
                    self.calculation_window_seconds,
                    constants::MIN_WINDOW_SECONDS
                ),
            });
        }
        Ok(())
    }

    /// Whether the engine for `category` should run.
    pub fn is_category_enabled(&self, category: MarkerCategory) -> bool {
        match category {
            MarkerCategory::Attention => self.enable_attention,
            MarkerCategory::Semantic => self.enable_semantic,
            MarkerCategory::Cluster => self.enable_cluster,
            MarkerCategory::Memory => self.enable_memory,
        }
    }

    pub fn set_category_enabled(&mut self, category: MarkerCategory, enabled: bool) {
        match category {
            MarkerCategory::Attention => self.enable_attention = enabled,
            MarkerCategory::Semantic => self.enable_semantic = enabled,
            MarkerCategory::Cluster => self.enable_cluster = enabled,
            MarkerCategory::Memory => self.enable_memory = enabled,
        }
    }

    /// Enabled categories in run order.
    pub fn enabled_categories(&self) -> Vec<MarkerCategory> {
        MarkerCategory::ALL
            .into_iter()
            .filter(|c| self.is_category_enabled(*c))
            .collect()
    }

    /// The provenance tag stamped onto every marker.
    pub fn provenance(&self) -> Provenance {
        Provenance::new(&self.provenance_source, &self.analysis_method)
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}
