//! Configuration system for TransRapport.
//! TOML-based, 3-layer resolution: explicit overrides > env > file > defaults.

pub mod analysis_config;

pub use analysis_config::{AnalysisConfig, ConfigOverrides};
