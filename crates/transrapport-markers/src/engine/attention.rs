//! Attention (ATO) heuristics.

use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::CategoryHeuristics;
use crate::context::SegmentContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct AttentionHeuristics;

impl CategoryHeuristics for AttentionHeuristics {
    fn category(&self) -> MarkerCategory {
        MarkerCategory::Attention
    }

    fn describe(&self, subtype: MarkerSubtype) -> &'static str {
        match subtype {
            MarkerSubtype::AttentionDirection => {
                "Speaker is directing attention or focus to a specific topic or aspect"
            }
            MarkerSubtype::AttentionAcknowledgment => {
                "Speaker is acknowledging attention direction or showing understanding"
            }
            MarkerSubtype::AttentionShift => {
                "Speaker is shifting attention to a different topic or perspective"
            }
            MarkerSubtype::AttentionMaintenance => {
                "Speaker is requesting sustained attention on current topic"
            }
            MarkerSubtype::AttentionFocus => {
                "Speaker is specifying particular focus or precision in attention"
            }
            _ => "Attention-related marker detected",
        }
    }

    fn speaker_score(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> f64 {
        let previous = ctx.previous_speaker();
        let same_speaker = previous.map(|p| p == ctx.current_speaker());
        match subtype {
            // Directions tend to come in runs from the same facilitator.
            MarkerSubtype::AttentionDirection => match same_speaker {
                Some(true) => 0.8,
                Some(false) => 0.6,
                None => 0.5,
            },
            MarkerSubtype::AttentionAcknowledgment => match same_speaker {
                Some(false) => 0.9,
                Some(true) => 0.4,
                None => 0.5,
            },
            MarkerSubtype::AttentionShift => 0.7,
            _ => 0.6,
        }
    }

    fn annotate(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> Option<String> {
        (subtype == MarkerSubtype::AttentionAcknowledgment && ctx.speaker_changed())
            .then(|| "following direction from previous speaker".to_string())
    }
}
