//! Per-marker weighting for rapport samples.
//!
//! ```text
//! weight = categoryWeight × subtypeModifier × confidence × proximity
//! ```
//!
//! The weight is signed: negative subtypes pull the magnitude down through
//! their modifier, while the value table decides which way the sample moves.

use transrapport_core::{MarkerCategory, MarkerEvent, MarkerSubtype};

/// Modifier for subtypes that signal rapport building.
pub const POSITIVE_MODIFIER: f64 = 1.2;
/// Modifier for subtypes that signal rapport erosion.
pub const NEGATIVE_MODIFIER: f64 = -0.8;
pub const NEUTRAL_MODIFIER: f64 = 1.0;

/// Floor for the temporal proximity factor.
pub const MIN_PROXIMITY: f64 = 0.1;

/// Default per-category weights, in `MarkerCategory::ALL` order.
pub const DEFAULT_CATEGORY_WEIGHTS: [f64; MarkerCategory::COUNT] = [0.8, 0.9, 0.7, 0.6];

/// Per-category base weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryWeights([f64; MarkerCategory::COUNT]);

impl Default for CategoryWeights {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY_WEIGHTS)
    }
}

impl CategoryWeights {
    pub fn get(&self, category: MarkerCategory) -> f64 {
        self.0[category.run_index()]
    }

    /// Replace one category's weight. Non-finite or negative weights are
    /// ignored.
    pub fn set(&mut self, category: MarkerCategory, weight: f64) {
        if weight.is_finite() && weight >= 0.0 {
            self.0[category.run_index()] = weight;
        } else {
            tracing::warn!(%category, weight, "ignoring invalid category weight");
        }
    }
}

pub fn subtype_modifier(subtype: MarkerSubtype) -> f64 {
    use MarkerSubtype::*;
    match subtype {
        AttentionAcknowledgment | SemanticAlignment | SemanticUnderstanding | ClusterFormation
        | ClusterReinforcement | MemoryAlignment => POSITIVE_MODIFIER,
        SemanticDivergence | ClusterDissolution | MemoryCorrection => NEGATIVE_MODIFIER,
        _ => NEUTRAL_MODIFIER,
    }
}

/// Rapport value a marker of `subtype` pushes its sample towards.
pub fn subtype_value(subtype: MarkerSubtype) -> f64 {
    use MarkerSubtype::*;
    match subtype {
        AttentionDirection => 0.3,
        AttentionAcknowledgment => 0.7,
        AttentionShift => 0.1,
        AttentionMaintenance => 0.4,
        AttentionFocus => 0.5,

        SemanticAlignment => 0.8,
        SemanticClarification => 0.2,
        SemanticUnderstanding => 0.9,
        SemanticExpansion => 0.6,
        SemanticDivergence => -0.6,

        ClusterFormation => 0.8,
        ClusterRecognition => 0.7,
        ClusterReinforcement => 0.9,
        ClusterDissolution => -0.5,
        ClusterTransition => 0.2,

        MemoryReference => 0.4,
        MemoryAlignment => 0.8,
        MemoryCorrection => -0.2,
        MemoryExpansion => 0.6,
        MemoryIntegration => 0.7,
    }
}

/// Linear falloff from the sample centre, floored at [`MIN_PROXIMITY`].
pub fn temporal_proximity(marker_start: f64, timestamp: f64, window: f64) -> f64 {
    let half = window / 2.0;
    if half <= 0.0 {
        return MIN_PROXIMITY;
    }
    (1.0 - (marker_start - timestamp).abs() / half).max(MIN_PROXIMITY)
}

/// Signed weight of `marker` in the sample at `timestamp`.
pub fn marker_weight(
    marker: &MarkerEvent,
    timestamp: f64,
    window: f64,
    weights: &CategoryWeights,
) -> f64 {
    weights.get(marker.category)
        * subtype_modifier(marker.subtype)
        * marker.confidence
        * temporal_proximity(marker.start_time, timestamp, window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_subtype_has_a_bounded_value() {
        for subtype in MarkerSubtype::ALL {
            assert!((-1.0..=1.0).contains(&subtype_value(subtype)), "{subtype}");
        }
    }

    #[test]
    fn modifiers_split_positive_and_negative() {
        assert_eq!(subtype_modifier(MarkerSubtype::SemanticUnderstanding), POSITIVE_MODIFIER);
        assert_eq!(subtype_modifier(MarkerSubtype::ClusterDissolution), NEGATIVE_MODIFIER);
        assert_eq!(subtype_modifier(MarkerSubtype::AttentionDirection), NEUTRAL_MODIFIER);
    }

    #[test]
    fn proximity_falls_off_and_floors() {
        assert!((temporal_proximity(30.0, 30.0, 60.0) - 1.0).abs() < 1e-12);
        assert!((temporal_proximity(15.0, 30.0, 60.0) - 0.5).abs() < 1e-12);
        assert!((temporal_proximity(0.0, 30.0, 60.0) - MIN_PROXIMITY).abs() < 1e-12);
    }

    #[test]
    fn invalid_category_weight_is_ignored() {
        let mut weights = CategoryWeights::default();
        weights.set(MarkerCategory::Memory, f64::NAN);
        assert_eq!(weights.get(MarkerCategory::Memory), 0.6);
        weights.set(MarkerCategory::Memory, 0.9);
        assert_eq!(weights.get(MarkerCategory::Memory), 0.9);
    }
}
