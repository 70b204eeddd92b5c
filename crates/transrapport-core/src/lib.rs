//! # transrapport-core
//!
//! Foundation crate for the TransRapport analysis engine.
//! Defines the data model, errors, config, constants, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AnalysisConfig;
pub use errors::{ConfigError, ModelError, PatternError, PipelineError, ValidationError};
pub use models::{
    ConfidenceBreakdown, InteractionContext, MarkerCategory, MarkerEvent, MarkerSubtype, Provenance,
    RapportIndicator, RapportLevel, RapportTrend, TranscriptSegment,
};
