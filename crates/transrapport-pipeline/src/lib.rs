//! # transrapport-pipeline
//!
//! Orchestrates a full analysis run: the four category engines, per-category
//! relationship post-processing, the global merge, and the rapport timeline.
//!
//! ```no_run
//! use transrapport_core::{AnalysisConfig, TranscriptSegment};
//! use transrapport_pipeline::AnalysisPipeline;
//!
//! transrapport_core::tracing::init_tracing();
//!
//! let pipeline = AnalysisPipeline::new(AnalysisConfig::default())?;
//! let segments = vec![
//!     TranscriptSegment::new(0.0, 5.0, Some("A"), "I want you to focus on this."),
//!     TranscriptSegment::new(15.0, 20.0, Some("B"), "Oh, I see what you mean."),
//! ];
//! let results = pipeline.run(&segments)?;
//! assert_eq!(results.markers.len(), 2);
//! # Ok::<(), transrapport_core::PipelineError>(())
//! ```

pub mod pipeline;
pub mod results;

pub use pipeline::AnalysisPipeline;
pub use results::{AnalysisMetadata, AnalysisResults, EngineInfo};
