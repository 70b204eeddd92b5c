//! # transrapport-markers
//!
//! Pattern-based marker detection: the pattern registry, per-segment
//! context windows, the four category engines, and the relationship
//! post-processor that de-duplicates and links each engine's output.

pub mod context;
pub mod engine;
pub mod lexicon;
pub mod registry;
pub mod relationships;
pub mod roles;
pub mod scoring;

pub use context::SegmentContext;
pub use engine::{CategoryEngine, CategoryHeuristics, EngineConfig};
pub use registry::{ContextRequirement, DetectionPattern, PatternRegistry};
pub use relationships::{MarkerSequence, RelationshipProcessor};
pub use roles::{analyze_speaker_roles, SpeakerRoles};
