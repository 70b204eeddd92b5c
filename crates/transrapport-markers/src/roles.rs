//! Speaker role inference from attention markers.

use std::collections::BTreeMap;

use serde::Serialize;

use transrapport_core::models::InteractionContext;
use transrapport_core::{MarkerEvent, MarkerSubtype};

/// Per-speaker marker tallies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeakerStats {
    pub direction_count: usize,
    pub acknowledgment_count: usize,
    pub shift_count: usize,
    pub total_markers: usize,
    pub average_confidence: f64,
}

/// Who steers attention and who follows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeakerRoles {
    pub facilitator: Option<String>,
    pub recipient: Option<String>,
    pub facilitator_markers: usize,
    pub recipient_markers: usize,
    pub statistics: BTreeMap<String, SpeakerStats>,
}

impl SpeakerRoles {
    /// Speaker-to-role map for rapport annotations.
    pub fn to_interaction_context(&self) -> InteractionContext {
        let mut speaker_roles = BTreeMap::new();
        if let Some(f) = &self.facilitator {
            speaker_roles.insert(f.clone(), "facilitator".to_string());
        }
        if let Some(r) = &self.recipient {
            speaker_roles.entry(r.clone()).or_insert_with(|| "recipient".to_string());
        }
        InteractionContext {
            speaker_roles,
            session_phase: None,
        }
    }
}

/// Tally markers per speaker and pick the facilitator (most directions) and
/// recipient (most acknowledgments). Ties go to the lexically first speaker.
pub fn analyze_speaker_roles(markers: &[MarkerEvent]) -> SpeakerRoles {
    let mut statistics: BTreeMap<String, SpeakerStats> = BTreeMap::new();
    let mut confidence_sums: BTreeMap<String, f64> = BTreeMap::new();

    for marker in markers {
        let speaker = marker.speaker.clone().unwrap_or_else(|| "unknown".to_string());
        let stats = statistics.entry(speaker.clone()).or_default();
        stats.total_markers += 1;
        match marker.subtype {
            MarkerSubtype::AttentionDirection => stats.direction_count += 1,
            MarkerSubtype::AttentionAcknowledgment => stats.acknowledgment_count += 1,
            MarkerSubtype::AttentionShift => stats.shift_count += 1,
            _ => {}
        }
        *confidence_sums.entry(speaker).or_default() += marker.confidence;
    }

    for (speaker, stats) in statistics.iter_mut() {
        let sum = confidence_sums.get(speaker).copied().unwrap_or(0.0);
        stats.average_confidence = sum / stats.total_markers as f64;
    }

    let leader_by = |count: fn(&SpeakerStats) -> usize| {
        statistics
            .iter()
            .filter(|(_, s)| count(s) > 0)
            .fold(None::<(&String, usize)>, |best, (name, s)| match best {
                Some((_, n)) if n >= count(s) => best,
                _ => Some((name, count(s))),
            })
            .map(|(name, _)| name.clone())
    };

    let facilitator = leader_by(|s| s.direction_count);
    let recipient = leader_by(|s| s.acknowledgment_count);
    let markers_of = |who: &Option<String>| {
        who.as_ref()
            .and_then(|w| statistics.get(w))
            .map_or(0, |s| s.total_markers)
    };

    SpeakerRoles {
        facilitator_markers: markers_of(&facilitator),
        recipient_markers: markers_of(&recipient),
        facilitator,
        recipient,
        statistics,
    }
}
