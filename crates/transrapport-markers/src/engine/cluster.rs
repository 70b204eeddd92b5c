//! Cluster (CLU) heuristics.

use std::collections::BTreeSet;

use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::CategoryHeuristics;
use crate::context::SegmentContext;

/// History segments (plus the current one) considered for group diversity.
const CLUSTER_HISTORY: usize = 3;

/// Speakers at which diversity saturates.
const DIVERSITY_CAP: f64 = 3.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterHeuristics;

fn distinct(speakers: &[&str]) -> usize {
    speakers.iter().collect::<BTreeSet<_>>().len()
}

impl CategoryHeuristics for ClusterHeuristics {
    fn category(&self) -> MarkerCategory {
        MarkerCategory::Cluster
    }

    fn describe(&self, subtype: MarkerSubtype) -> &'static str {
        match subtype {
            MarkerSubtype::ClusterFormation => {
                "Speakers forming collective understanding or shared perspective"
            }
            MarkerSubtype::ClusterRecognition => {
                "Recognition of shared understanding or collective agreement"
            }
            MarkerSubtype::ClusterReinforcement => {
                "Reinforcement of established cluster or shared viewpoint"
            }
            MarkerSubtype::ClusterDissolution => {
                "Dissolution or challenge to established cluster understanding"
            }
            MarkerSubtype::ClusterTransition => {
                "Transition between different cluster formations or topics"
            }
            _ => "Cluster formation marker detected",
        }
    }

    fn speaker_score(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> f64 {
        let speakers = ctx.recent_speakers(CLUSTER_HISTORY);
        let diversity = (distinct(&speakers) as f64 / DIVERSITY_CAP).min(1.0);
        match subtype {
            MarkerSubtype::ClusterFormation => 0.3 + 0.7 * diversity,
            MarkerSubtype::ClusterRecognition => 0.5 + 0.5 * diversity,
            MarkerSubtype::ClusterReinforcement => {
                let tail = &speakers[speakers.len().saturating_sub(3)..];
                let back_and_forth = (distinct(tail) as f64 / 2.0).min(1.0);
                0.4 + 0.6 * back_and_forth
            }
            _ => 0.6,
        }
    }

    fn annotate(&self, _subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> Option<String> {
        let count = distinct(&ctx.recent_speakers(CLUSTER_HISTORY));
        (count > 1).then(|| format!("involving {count} speakers"))
    }
}
