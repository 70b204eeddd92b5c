//! Result bundle returned by a pipeline run.

use std::collections::BTreeMap;

use serde::Serialize;

use transrapport_core::errors::PatternWarning;
use transrapport_core::{AnalysisConfig, MarkerCategory, MarkerEvent, RapportIndicator};
use transrapport_markers::{MarkerSequence, SpeakerRoles};

/// Markers, rapport timeline, and run metadata.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResults {
    /// Sorted by start time; ties keep category run order.
    pub markers: Vec<MarkerEvent>,
    /// Sorted by timestamp.
    pub rapport: Vec<RapportIndicator>,
    pub sequences: Vec<MarkerSequence>,
    pub speaker_roles: SpeakerRoles,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResults {
    pub(crate) fn empty(metadata: AnalysisMetadata) -> Self {
        Self {
            markers: Vec::new(),
            rapport: Vec::new(),
            sequences: Vec::new(),
            speaker_roles: SpeakerRoles::default(),
            metadata,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers of one category, in output order.
    pub fn markers_of(&self, category: MarkerCategory) -> impl Iterator<Item = &MarkerEvent> {
        self.markers.iter().filter(move |m| m.category == category)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    pub segment_count: usize,
    pub marker_count: usize,
    /// Every enabled category, zero counts included.
    pub per_category_counts: BTreeMap<MarkerCategory, usize>,
    pub enabled_categories: Vec<MarkerCategory>,
    pub confidence_threshold: f64,
    pub indicator_count: usize,
    pub session_duration: f64,
    pub processing_duration_secs: f64,
    pub config: AnalysisConfig,
    /// Malformed rules skipped when the registry was loaded.
    pub pattern_warnings: Vec<PatternWarning>,
}

/// What a pipeline instance will run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineInfo {
    pub category: MarkerCategory,
    pub code: &'static str,
    pub pattern_count: usize,
}
