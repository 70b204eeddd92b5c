//! Overlap resolution and sequence linking within one category's markers.

use serde::Serialize;

use transrapport_core::{MarkerEvent, MarkerSubtype};

/// A known "X is typically followed by Y" pairing.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceRule {
    pub name: &'static str,
    pub description: &'static str,
    pub leader: MarkerSubtype,
    pub followers: &'static [MarkerSubtype],
    /// How many subsequent markers to inspect.
    pub lookahead: usize,
    /// Largest allowed gap (follower start minus leader end), seconds.
    pub max_gap: f64,
}

impl SequenceRule {
    fn matches(&self, leader: &MarkerEvent, follower: &MarkerEvent) -> bool {
        leader.subtype == self.leader
            && self.followers.contains(&follower.subtype)
            && follower.start_time - leader.end_time <= self.max_gap
    }
}

/// The built-in sequence rules.
pub const DEFAULT_SEQUENCE_RULES: [SequenceRule; 5] = [
    SequenceRule {
        name: "direction_acknowledgment",
        description: "Attention direction followed by acknowledgment",
        leader: MarkerSubtype::AttentionDirection,
        followers: &[MarkerSubtype::AttentionAcknowledgment],
        lookahead: 3,
        max_gap: 30.0,
    },
    SequenceRule {
        name: "clarification_understanding",
        description: "Clarification request followed by demonstrated understanding",
        leader: MarkerSubtype::SemanticClarification,
        followers: &[MarkerSubtype::SemanticUnderstanding],
        lookahead: 3,
        max_gap: 30.0,
    },
    SequenceRule {
        name: "formation_reinforcement",
        description: "Cluster formation followed by mutual reinforcement",
        leader: MarkerSubtype::ClusterFormation,
        followers: &[MarkerSubtype::ClusterReinforcement],
        lookahead: 3,
        max_gap: 45.0,
    },
    SequenceRule {
        name: "correction_elaboration",
        description: "Memory correction followed by expansion or integration",
        leader: MarkerSubtype::MemoryCorrection,
        followers: &[MarkerSubtype::MemoryExpansion, MarkerSubtype::MemoryIntegration],
        lookahead: 3,
        max_gap: 60.0,
    },
    SequenceRule {
        name: "reference_alignment",
        description: "Memory reference followed by shared-memory alignment",
        leader: MarkerSubtype::MemoryReference,
        followers: &[MarkerSubtype::MemoryAlignment],
        lookahead: 3,
        max_gap: 45.0,
    },
];

/// A detected leader/follower pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerSequence {
    pub pattern_type: String,
    pub description: String,
    pub marker_ids: Vec<String>,
    pub time_span: f64,
    pub confidence: f64,
}

/// De-duplicates overlapping markers and links known sequences.
#[derive(Debug, Clone)]
pub struct RelationshipProcessor {
    rules: Vec<SequenceRule>,
}

impl Default for RelationshipProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl RelationshipProcessor {
    pub fn new() -> Self {
        Self {
            rules: DEFAULT_SEQUENCE_RULES.to_vec(),
        }
    }

    pub fn with_rules(rules: Vec<SequenceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SequenceRule] {
        &self.rules
    }

    /// Sort, resolve overlaps, then link. Idempotent.
    pub fn process(&self, markers: Vec<MarkerEvent>) -> Vec<MarkerEvent> {
        let mut accepted = resolve_overlaps(markers);
        self.link(&mut accepted);
        accepted
    }

    /// Record a bidirectional link for the first follower of each leader.
    pub fn link(&self, markers: &mut [MarkerEvent]) {
        for (i, j) in self.pairs(markers) {
            let leader_id = markers[i].id.clone();
            let follower_id = markers[j].id.clone();
            markers[i].add_related(follower_id);
            markers[j].add_related(leader_id);
        }
    }

    /// Leader/follower pairs found in time-sorted `markers`.
    pub fn identify_sequences(&self, markers: &[MarkerEvent]) -> Vec<MarkerSequence> {
        self.pairs(markers)
            .into_iter()
            .filter_map(|(i, j)| {
                let (leader, follower) = (&markers[i], &markers[j]);
                let rule = self.rules.iter().find(|r| r.matches(leader, follower))?;
                Some(MarkerSequence {
                    pattern_type: rule.name.to_string(),
                    description: rule.description.to_string(),
                    marker_ids: vec![leader.id.clone(), follower.id.clone()],
                    time_span: follower.end_time - leader.start_time,
                    confidence: leader.confidence.min(follower.confidence),
                })
            })
            .collect()
    }

    fn pairs(&self, markers: &[MarkerEvent]) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, leader) in markers.iter().enumerate() {
            for rule in self.rules.iter().filter(|r| r.leader == leader.subtype) {
                let end = (i + 1 + rule.lookahead).min(markers.len());
                if let Some(j) = (i + 1..end).find(|&j| rule.matches(leader, &markers[j])) {
                    pairs.push((i, j));
                    break;
                }
            }
        }
        pairs
    }
}

/// Stable sort by start time, then keep the higher-confidence marker of
/// every overlapping group. Ties keep the earlier-emitted marker.
pub fn resolve_overlaps(mut markers: Vec<MarkerEvent>) -> Vec<MarkerEvent> {
    markers.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

    let mut accepted: Vec<MarkerEvent> = Vec::with_capacity(markers.len());
    for candidate in markers {
        let best_overlapped = accepted
            .iter()
            .filter(|m| m.overlaps_with(&candidate))
            .map(|m| m.confidence)
            .fold(None, |acc: Option<f64>, c| Some(acc.map_or(c, |a| a.max(c))));

        match best_overlapped {
            None => accepted.push(candidate),
            Some(best) if candidate.confidence > best => {
                accepted.retain(|m| !m.overlaps_with(&candidate));
                accepted.push(candidate);
            }
            Some(_) => {}
        }
    }
    accepted
}
