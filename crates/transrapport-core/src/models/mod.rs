//! Fixed-shape value types for segments, markers, and rapport indicators.

pub mod category;
pub mod ids;
pub mod marker;
pub mod provenance;
pub mod rapport;
pub mod segment;

pub use category::{MarkerCategory, MarkerSubtype};
pub use ids::stable_id;
pub use marker::{ConfidenceBreakdown, ConfidenceLevel, ContextWindow, MarkerEvent, MarkerEventBuilder};
pub use provenance::Provenance;
pub use rapport::{InteractionContext, RapportIndicator, RapportLevel, RapportTrend};
pub use segment::TranscriptSegment;
