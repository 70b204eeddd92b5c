//! Per-segment context windows.

use std::collections::BTreeSet;

use transrapport_core::constants::DEFAULT_CONTEXT_WINDOW;
use transrapport_core::TranscriptSegment;

/// A bounded view of the transcript around one segment.
///
/// Borrowed from the caller's segment list; building a context never copies
/// segment text.
#[derive(Debug, Clone)]
pub struct SegmentContext<'a> {
    pub index: usize,
    pub current: &'a TranscriptSegment,
    /// Up to `window` segments immediately before `current`.
    pub previous: &'a [TranscriptSegment],
    /// Up to `window` segments immediately after `current`.
    pub next: &'a [TranscriptSegment],
    /// Every segment before `current`.
    pub history: &'a [TranscriptSegment],
    /// Speaker labels across previous + current + next.
    pub speaker_sequence: Vec<&'a str>,
}

impl<'a> SegmentContext<'a> {
    /// Build the context for `segments[index]`. Returns `None` when `index`
    /// is out of bounds; boundary indices yield shorter neighbour slices.
    pub fn build(segments: &'a [TranscriptSegment], index: usize, window: usize) -> Option<Self> {
        let current = segments.get(index)?;
        let previous = &segments[index.saturating_sub(window)..index];
        let next_end = index.saturating_add(window).saturating_add(1).min(segments.len());
        let next = &segments[index + 1..next_end];

        let speaker_sequence = previous
            .iter()
            .chain(std::iter::once(current))
            .chain(next.iter())
            .map(TranscriptSegment::speaker_label)
            .collect();

        Some(Self {
            index,
            current,
            previous,
            next,
            history: &segments[..index],
            speaker_sequence,
        })
    }

    pub fn with_default_window(segments: &'a [TranscriptSegment], index: usize) -> Option<Self> {
        Self::build(segments, index, DEFAULT_CONTEXT_WINDOW)
    }

    pub fn current_speaker(&self) -> &'a str {
        self.current.speaker_label()
    }

    /// The segment immediately before `current`, if any.
    pub fn previous_segment(&self) -> Option<&'a TranscriptSegment> {
        self.previous.last()
    }

    pub fn previous_speaker(&self) -> Option<&'a str> {
        self.previous_segment().map(TranscriptSegment::speaker_label)
    }

    /// True when a previous segment exists and its speaker differs.
    pub fn speaker_changed(&self) -> bool {
        self.previous_speaker()
            .is_some_and(|prev| prev != self.current_speaker())
    }

    /// Text of the previous-window segments joined with spaces.
    pub fn previous_text(&self) -> String {
        join_text(self.previous)
    }

    /// Distinct speakers over the last `n` history segments plus `current`.
    pub fn recent_speakers(&self, n: usize) -> Vec<&'a str> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..]
            .iter()
            .chain(std::iter::once(self.current))
            .map(TranscriptSegment::speaker_label)
            .collect()
    }

    /// Number of distinct speakers across all history plus `current`.
    pub fn distinct_speakers(&self) -> usize {
        self.history
            .iter()
            .chain(std::iter::once(self.current))
            .map(TranscriptSegment::speaker_label)
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Whether anyone other than the current speaker appears in history.
    pub fn history_has_other_speaker(&self) -> bool {
        let me = self.current_speaker();
        self.history.iter().any(|s| s.speaker_label() != me)
    }

    /// Count of distinct 4+ letter words the current text shares with history.
    pub fn shared_topic_words(&self) -> usize {
        let current = topic_words(&self.current.text);
        if current.is_empty() {
            return 0;
        }
        let mut shared = BTreeSet::new();
        for seg in self.history {
            for word in topic_words(&seg.text) {
                if current.contains(&word) {
                    shared.insert(word);
                }
            }
        }
        shared.len()
    }

    /// Text of the previous and next windows, for marker context capture.
    pub fn neighbour_text(&self) -> (Vec<String>, Vec<String>) {
        let grab = |segs: &[TranscriptSegment]| {
            segs.iter()
                .map(|s| s.trimmed_text().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        };
        (grab(self.previous), grab(self.next))
    }
}

fn join_text(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(TranscriptSegment::trimmed_text)
        .collect::<Vec<_>>()
        .join(" ")
}

fn topic_words(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphabetic())
        .filter(|w| w.chars().count() >= 4)
        .map(str::to_lowercase)
        .collect()
}
