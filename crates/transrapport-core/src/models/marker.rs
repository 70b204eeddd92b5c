use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::category::{MarkerCategory, MarkerSubtype};
use super::ids::stable_id;
use super::provenance::Provenance;
use crate::errors::ModelError;

/// Per-dimension sub-scores behind a marker's confidence.
///
/// `total()` reproduces the final confidence: the weighted sum of the four
/// sub-scores, multiplied by the pattern's base weight, clamped to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceBreakdown {
    pub lexical: f64,
    pub contextual: f64,
    pub temporal: f64,
    pub speaker_interaction: f64,
    pub base_weight: f64,
}

impl ConfidenceBreakdown {
    pub fn total(&self) -> f64 {
        use crate::constants::{CONTEXTUAL_WEIGHT, LEXICAL_WEIGHT, SPEAKER_WEIGHT, TEMPORAL_WEIGHT};
        let combined = LEXICAL_WEIGHT * self.lexical
            + CONTEXTUAL_WEIGHT * self.contextual
            + TEMPORAL_WEIGHT * self.temporal
            + SPEAKER_WEIGHT * self.speaker_interaction;
        (combined * self.base_weight).clamp(0.0, 1.0)
    }
}

/// Neighbouring text captured around a marker when context collection is on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextWindow {
    pub before_text: Vec<String>,
    pub after_text: Vec<String>,
}

/// Coarse confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConfidenceLevel {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence < 0.5 {
            Self::Low
        } else if confidence < 0.7 {
            Self::Medium
        } else if confidence < 0.9 {
            Self::High
        } else {
            Self::VeryHigh
        }
    }
}

/// A detected communicative event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEvent {
    pub id: String,
    pub category: MarkerCategory,
    pub subtype: MarkerSubtype,
    pub start_time: f64,
    pub end_time: f64,
    pub confidence: f64,
    pub evidence: String,
    pub explanation: String,
    #[serde(default)]
    pub speaker: Option<String>,
    pub provenance: Provenance,
    #[serde(default)]
    pub related_markers: BTreeSet<String>,
    #[serde(default)]
    pub confidence_breakdown: Option<ConfidenceBreakdown>,
    #[serde(default)]
    pub context_window: Option<ContextWindow>,
    #[serde(default)]
    pub pattern_id: Option<String>,
}

impl MarkerEvent {
    pub fn builder(
        category: MarkerCategory,
        subtype: MarkerSubtype,
        start_time: f64,
        end_time: f64,
    ) -> MarkerEventBuilder {
        MarkerEventBuilder::new(category, subtype, start_time, end_time)
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// True if the two time ranges share any interior time. Touching
    /// endpoints do not count.
    pub fn overlaps_with(&self, other: &MarkerEvent) -> bool {
        !(self.end_time <= other.start_time || other.end_time <= self.start_time)
    }

    pub fn overlap_duration(&self, other: &MarkerEvent) -> f64 {
        let start = self.start_time.max(other.start_time);
        let end = self.end_time.min(other.end_time);
        (end - start).max(0.0)
    }

    /// Inclusive intersection with `[window_start, window_end]`.
    pub fn intersects_window(&self, window_start: f64, window_end: f64) -> bool {
        self.start_time <= window_end && self.end_time >= window_start
    }

    pub fn add_related(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id != self.id {
            self.related_markers.insert(id);
        }
    }

    pub fn is_related_to(&self, id: &str) -> bool {
        self.related_markers.contains(id)
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }

    pub fn is_high_confidence(&self, threshold: f64) -> bool {
        self.confidence >= threshold
    }

    /// Check the structural invariants that the builder enforces.
    pub fn check(&self) -> Result<(), ModelError> {
        check_time(self.start_time)?;
        check_time(self.end_time)?;
        if self.start_time > self.end_time {
            return Err(ModelError::InvertedTimeRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(ModelError::ConfidenceOutOfRange {
                value: self.confidence,
            });
        }
        if self.evidence.trim().is_empty() {
            return Err(ModelError::EmptyEvidence);
        }
        Ok(())
    }
}

fn check_time(value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::NegativeTime { value })
    }
}

/// Builds a [`MarkerEvent`], validating invariants on `build()`.
#[derive(Debug, Clone)]
pub struct MarkerEventBuilder {
    id: Option<String>,
    category: MarkerCategory,
    subtype: MarkerSubtype,
    start_time: f64,
    end_time: f64,
    confidence: f64,
    evidence: String,
    explanation: String,
    speaker: Option<String>,
    provenance: Provenance,
    related_markers: BTreeSet<String>,
    confidence_breakdown: Option<ConfidenceBreakdown>,
    context_window: Option<ContextWindow>,
    pattern_id: Option<String>,
}

impl MarkerEventBuilder {
    pub fn new(
        category: MarkerCategory,
        subtype: MarkerSubtype,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            id: None,
            category,
            subtype,
            start_time,
            end_time,
            confidence: 0.0,
            evidence: String::new(),
            explanation: String::new(),
            speaker: None,
            provenance: Provenance::default(),
            related_markers: BTreeSet::new(),
            confidence_breakdown: None,
            context_window: None,
            pattern_id: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = evidence.into();
        self
    }

    pub fn explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn speaker(mut self, speaker: Option<String>) -> Self {
        self.speaker = speaker;
        self
    }

    pub fn provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }

    pub fn related(mut self, id: impl Into<String>) -> Self {
        self.related_markers.insert(id.into());
        self
    }

    pub fn breakdown(mut self, breakdown: ConfidenceBreakdown) -> Self {
        self.confidence_breakdown = Some(breakdown);
        self
    }

    pub fn context_window(mut self, window: ContextWindow) -> Self {
        self.context_window = Some(window);
        self
    }

    pub fn pattern_id(mut self, pattern_id: impl Into<String>) -> Self {
        self.pattern_id = Some(pattern_id.into());
        self
    }

    pub fn build(self) -> Result<MarkerEvent, ModelError> {
        let id = match self.id {
            Some(id) => id,
            None => {
                let start = format!("{:.3}", self.start_time);
                let end = format!("{:.3}", self.end_time);
                stable_id(
                    "marker",
                    &[
                        self.category.as_str(),
                        self.subtype.as_str(),
                        self.pattern_id.as_deref().unwrap_or(""),
                        &start,
                        &end,
                        &self.evidence,
                    ],
                )
            }
        };
        let mut related_markers = self.related_markers;
        related_markers.remove(&id);

        let marker = MarkerEvent {
            id,
            category: self.category,
            subtype: self.subtype,
            start_time: self.start_time,
            end_time: self.end_time,
            confidence: self.confidence,
            evidence: self.evidence,
            explanation: self.explanation,
            speaker: self.speaker,
            provenance: self.provenance,
            related_markers,
            confidence_breakdown: self.confidence_breakdown,
            context_window: self.context_window,
            pattern_id: self.pattern_id,
        };
        marker.check()?;
        Ok(marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(start: f64, end: f64) -> MarkerEvent {
        MarkerEvent::builder(
            MarkerCategory::Attention,
            MarkerSubtype::AttentionFocus,
            start,
            end,
        )
        .confidence(0.8)
        .evidence("focus on this")
        .build()
        .unwrap()
    }

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!marker(0.0, 2.0).overlaps_with(&marker(2.0, 4.0)));
        assert!(marker(0.0, 2.5).overlaps_with(&marker(2.0, 4.0)));
    }

    #[test]
    fn builder_rejects_inverted_range() {
        let err = MarkerEvent::builder(
            MarkerCategory::Memory,
            MarkerSubtype::MemoryReference,
            5.0,
            4.0,
        )
        .confidence(0.5)
        .evidence("remember")
        .build()
        .unwrap_err();
        assert!(matches!(err, ModelError::InvertedTimeRange { .. }));
    }

    #[test]
    fn add_related_ignores_self() {
        let mut m = marker(0.0, 1.0);
        let own = m.id.clone();
        m.add_related(own.clone());
        assert!(!m.is_related_to(&own));
    }
}
