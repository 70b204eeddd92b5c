//! Memory (MEMA) heuristics.

use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::CategoryHeuristics;
use crate::context::SegmentContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryHeuristics;

impl CategoryHeuristics for MemoryHeuristics {
    fn category(&self) -> MarkerCategory {
        MarkerCategory::Memory
    }

    fn describe(&self, subtype: MarkerSubtype) -> &'static str {
        match subtype {
            MarkerSubtype::MemoryReference => {
                "Speaker making explicit reference to previous conversational content or shared memory"
            }
            MarkerSubtype::MemoryAlignment => {
                "Speakers demonstrating shared conversational memory and aligned understanding"
            }
            MarkerSubtype::MemoryCorrection => {
                "Speaker correcting or updating previous statements or shared understanding"
            }
            MarkerSubtype::MemoryExpansion => {
                "Speaker expanding on or elaborating previous conversational content"
            }
            MarkerSubtype::MemoryIntegration => {
                "Speaker integrating multiple conversational memories into coherent understanding"
            }
            _ => "Memory-related marker detected",
        }
    }

    fn speaker_score(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> f64 {
        let shared = ctx.distinct_speakers() >= 2;
        match subtype {
            MarkerSubtype::MemoryReference => {
                if ctx.history_has_other_speaker() {
                    0.7
                } else {
                    0.5
                }
            }
            MarkerSubtype::MemoryAlignment => {
                if shared {
                    0.8
                } else {
                    0.5
                }
            }
            // Self-corrections follow the speaker's own previous turn.
            MarkerSubtype::MemoryCorrection => {
                if ctx.previous_speaker() == Some(ctx.current_speaker()) {
                    0.7
                } else {
                    0.6
                }
            }
            MarkerSubtype::MemoryIntegration => {
                if shared {
                    0.7
                } else {
                    0.6
                }
            }
            _ => 0.6,
        }
    }

    fn annotate(&self, _subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> Option<String> {
        let n = ctx.history.len();
        (n > 0).then(|| format!("(referencing conversation history of {n} segments)"))
    }
}
