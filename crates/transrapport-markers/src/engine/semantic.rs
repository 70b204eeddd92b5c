//! Semantic (SEM) heuristics.

use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::CategoryHeuristics;
use crate::context::SegmentContext;

#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticHeuristics;

impl CategoryHeuristics for SemanticHeuristics {
    fn category(&self) -> MarkerCategory {
        MarkerCategory::Semantic
    }

    fn describe(&self, subtype: MarkerSubtype) -> &'static str {
        match subtype {
            MarkerSubtype::SemanticAlignment => {
                "Speaker demonstrates semantic alignment and agreement with previous statements"
            }
            MarkerSubtype::SemanticClarification => {
                "Speaker requests clarification or demonstrates semantic uncertainty"
            }
            MarkerSubtype::SemanticUnderstanding => {
                "Speaker demonstrates semantic understanding and comprehension"
            }
            MarkerSubtype::SemanticExpansion => {
                "Speaker expands semantic content building on previous statements"
            }
            MarkerSubtype::SemanticDivergence => {
                "Speaker expresses semantic disagreement or alternative perspective"
            }
            _ => "Semantic marker detected",
        }
    }

    fn speaker_score(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> f64 {
        let changed = ctx.speaker_changed();
        match subtype {
            MarkerSubtype::SemanticAlignment
            | MarkerSubtype::SemanticUnderstanding
            | MarkerSubtype::SemanticDivergence => {
                if changed {
                    0.8
                } else {
                    0.5
                }
            }
            MarkerSubtype::SemanticClarification => {
                if changed {
                    0.8
                } else {
                    0.6
                }
            }
            // Elaboration usually continues the speaker's own turn.
            MarkerSubtype::SemanticExpansion => {
                let same = ctx.previous_speaker() == Some(ctx.current_speaker());
                if same {
                    0.7
                } else {
                    0.6
                }
            }
            _ => 0.6,
        }
    }
}
