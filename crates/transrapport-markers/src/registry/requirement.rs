//! Named context requirements a pattern may declare.

use std::fmt;

use transrapport_core::constants::{MAX_MARKER_DURATION, MIN_MARKER_DURATION};

use crate::context::SegmentContext;
use crate::lexicon::CueLexicon;

const SHARED_HISTORY_MIN: usize = 3;
const EXTENDED_HISTORY_MIN: usize = 6;
const TOPIC_OVERLAP_MIN: usize = 2;

/// Closed set of contextual conditions. A pattern pairs each with the
/// boolean it expects; the requirement is satisfied when the observed
/// condition equals that expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContextRequirement {
    SpeakerChange,
    FollowsDirection,
    ImperativeMood,
    InterruptionMarker,
    Redirection,
    SustainedAttention,
    PlausibleDuration,
    SpecificityMarker,
    DirectedAttention,
    FollowsStatement,
    FollowsComplexity,
    FollowsExplanation,
    FollowsIndividualView,
    FollowsDiscussion,
    FollowsAgreement,
    TopicContinuity,
    SharedHistory,
    ExtendedHistory,
    MultiSpeaker,
}

impl ContextRequirement {
    pub const ALL: [ContextRequirement; 19] = [
        Self::SpeakerChange,
        Self::FollowsDirection,
        Self::ImperativeMood,
        Self::InterruptionMarker,
        Self::Redirection,
        Self::SustainedAttention,
        Self::PlausibleDuration,
        Self::SpecificityMarker,
        Self::DirectedAttention,
        Self::FollowsStatement,
        Self::FollowsComplexity,
        Self::FollowsExplanation,
        Self::FollowsIndividualView,
        Self::FollowsDiscussion,
        Self::FollowsAgreement,
        Self::TopicContinuity,
        Self::SharedHistory,
        Self::ExtendedHistory,
        Self::MultiSpeaker,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SpeakerChange => "speaker_change",
            Self::FollowsDirection => "follows_direction",
            Self::ImperativeMood => "imperative_mood",
            Self::InterruptionMarker => "interruption_marker",
            Self::Redirection => "redirection",
            Self::SustainedAttention => "sustained_attention",
            Self::PlausibleDuration => "plausible_duration",
            Self::SpecificityMarker => "specificity_marker",
            Self::DirectedAttention => "directed_attention",
            Self::FollowsStatement => "follows_statement",
            Self::FollowsComplexity => "follows_complexity",
            Self::FollowsExplanation => "follows_explanation",
            Self::FollowsIndividualView => "follows_individual_view",
            Self::FollowsDiscussion => "follows_discussion",
            Self::FollowsAgreement => "follows_agreement",
            Self::TopicContinuity => "topic_continuity",
            Self::SharedHistory => "shared_history",
            Self::ExtendedHistory => "extended_history",
            Self::MultiSpeaker => "multi_speaker",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|r| r.as_str() == key)
    }

    /// Human-readable label used in marker explanations.
    pub fn label(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Observe this condition in `ctx`.
    pub fn observe(self, ctx: &SegmentContext<'_>, cues: &CueLexicon) -> bool {
        let text = ctx.current.text.as_str();
        match self {
            Self::SpeakerChange => ctx.speaker_changed(),
            Self::FollowsDirection => cues.direction.contains_any(&ctx.previous_text()),
            Self::ImperativeMood => cues.imperative.contains_any(text),
            Self::InterruptionMarker => cues.interruption.contains_any(text),
            Self::Redirection => cues.redirection.contains_any(text),
            Self::SustainedAttention => cues.sustained.contains_any(text),
            Self::PlausibleDuration => {
                (MIN_MARKER_DURATION..=MAX_MARKER_DURATION).contains(&ctx.current.duration())
            }
            Self::SpecificityMarker => cues.specificity.contains_any(text),
            Self::DirectedAttention => cues.directed.contains_any(text),
            Self::FollowsStatement => ctx
                .previous_segment()
                .is_some_and(|s| !s.trimmed_text().is_empty()),
            Self::FollowsComplexity => cues.complexity.contains_any(&ctx.previous_text()),
            Self::FollowsExplanation => cues.explanation.contains_any(&ctx.previous_text()),
            Self::FollowsIndividualView => cues.individual_view.contains_any(&ctx.previous_text()),
            Self::FollowsDiscussion => cues.discussion.contains_any(&ctx.previous_text()),
            Self::FollowsAgreement => cues.agreement.contains_any(&ctx.previous_text()),
            Self::TopicContinuity => ctx.shared_topic_words() >= TOPIC_OVERLAP_MIN,
            Self::SharedHistory => ctx.history.len() >= SHARED_HISTORY_MIN,
            Self::ExtendedHistory => ctx.history.len() >= EXTENDED_HISTORY_MIN,
            Self::MultiSpeaker => ctx.distinct_speakers() >= 2,
        }
    }
}

impl fmt::Display for ContextRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use transrapport_core::TranscriptSegment;

    use super::*;

    #[test]
    fn names_round_trip() {
        for r in ContextRequirement::ALL {
            assert_eq!(ContextRequirement::parse_str(r.as_str()), Some(r));
        }
        assert_eq!(ContextRequirement::parse_str("duration_context"), None);
    }

    #[test]
    fn follows_direction_reads_previous_window() {
        let cues = CueLexicon::new().unwrap();
        let segs = vec![
            TranscriptSegment::new(0.0, 5.0, Some("A"), "I want you to focus on this."),
            TranscriptSegment::new(15.0, 20.0, Some("B"), "Oh, I see what you mean."),
        ];
        let first = SegmentContext::build(&segs, 0, 2).unwrap();
        let second = SegmentContext::build(&segs, 1, 2).unwrap();
        assert!(!ContextRequirement::FollowsDirection.observe(&first, &cues));
        assert!(ContextRequirement::FollowsDirection.observe(&second, &cues));
        assert!(ContextRequirement::SpeakerChange.observe(&second, &cues));
        assert!(ContextRequirement::ImperativeMood.observe(&first, &cues));
        assert!(ContextRequirement::PlausibleDuration.observe(&first, &cues));
    }
}
