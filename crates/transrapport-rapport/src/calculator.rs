//! Rapport timeline calculation over a merged marker list.

use std::collections::BTreeMap;

use statrs::statistics::Statistics;

use transrapport_core::constants::{
    DEFAULT_SMOOTHING_FACTOR, DEFAULT_WINDOW_SECONDS, RAPPORT_MARKER_CAP,
};
use transrapport_core::{
    AnalysisConfig, InteractionContext, MarkerCategory, MarkerEvent, ModelError, RapportIndicator,
};

use crate::trend;
use crate::weights::{self, CategoryWeights};
use crate::window;

/// Confidence split: mean marker confidence, marker count, temporal spread.
const QUALITY_SHARE: f64 = 0.5;
const QUANTITY_SHARE: f64 = 0.3;
const SPREAD_SHARE: f64 = 0.2;

/// Spread credited to a single marker.
const SINGLE_MARKER_SPREAD: f64 = 0.5;

/// One sample before smoothing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSample {
    pub timestamp: f64,
    /// Weight-normalized value, clamped to [-1, 1].
    pub value: f64,
    pub confidence: f64,
    /// Contributing marker ids, in time order.
    pub marker_ids: Vec<String>,
    /// Signed weight per contributing marker.
    pub contributions: BTreeMap<String, f64>,
}

/// Computes rapport indicators from markers.
#[derive(Debug, Clone)]
pub struct RapportCalculator {
    window: f64,
    smoothing: f64,
    weights: CategoryWeights,
}

impl Default for RapportCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SECONDS, DEFAULT_SMOOTHING_FACTOR)
    }
}

impl RapportCalculator {
    pub fn new(window: f64, smoothing: f64) -> Self {
        Self {
            window,
            smoothing,
            weights: CategoryWeights::default(),
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(config.calculation_window_seconds, config.smoothing_factor)
    }

    /// Override the base weight of one category.
    pub fn with_category_weight(mut self, category: MarkerCategory, weight: f64) -> Self {
        self.weights.set(category, weight);
        self
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    pub fn smoothing(&self) -> f64 {
        self.smoothing
    }

    pub fn weights(&self) -> &CategoryWeights {
        &self.weights
    }

    /// The rapport timeline for `markers` over a session of
    /// `session_duration` seconds.
    ///
    /// Samples with no contributing markers are skipped. Smoothing and trend
    /// history continue from the last emitted indicator.
    pub fn calculate(
        &self,
        markers: &[MarkerEvent],
        session_duration: f64,
    ) -> Result<Vec<RapportIndicator>, ModelError> {
        if markers.is_empty() {
            return Ok(Vec::new());
        }

        let mut sorted: Vec<MarkerEvent> = markers.to_vec();
        sorted.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        let timestamps = window::sample_timestamps(session_duration, self.window);
        let mut indicators: Vec<RapportIndicator> = Vec::with_capacity(timestamps.len());
        let mut history: Vec<f64> = Vec::with_capacity(timestamps.len());
        let mut skipped = 0usize;

        for &timestamp in &timestamps {
            let Some(sample) = self.sample(&sorted, timestamp) else {
                skipped += 1;
                continue;
            };

            let value = match history.last() {
                Some(&previous) => trend::smooth(previous, sample.value, self.smoothing),
                None => sample.value,
            }
            .clamp(-1.0, 1.0);
            let trend = trend::classify_trend(&history, value);

            let indicator = RapportIndicator::new(
                timestamp,
                value,
                trend,
                sample.confidence,
                sample.marker_ids,
                self.window,
            )?
            .with_contributions(sample.contributions);

            history.push(value);
            indicators.push(indicator);
        }

        tracing::info!(
            marker_count = markers.len(),
            sample_count = timestamps.len(),
            indicator_count = indicators.len(),
            skipped_empty = skipped,
            "rapport timeline calculated"
        );
        Ok(indicators)
    }

    /// [`calculate`](Self::calculate), annotating each indicator with
    /// `context`.
    pub fn calculate_with_context(
        &self,
        markers: &[MarkerEvent],
        session_duration: f64,
        context: &InteractionContext,
    ) -> Result<Vec<RapportIndicator>, ModelError> {
        Ok(self
            .calculate(markers, session_duration)?
            .into_iter()
            .map(|indicator| indicator.with_context(context.clone()))
            .collect())
    }

    /// The unsmoothed sample at `timestamp`, or `None` when no marker
    /// intersects its window.
    pub fn sample(&self, markers: &[MarkerEvent], timestamp: f64) -> Option<RawSample> {
        let selected = window::markers_in_window(markers, timestamp, self.window);
        if selected.is_empty() {
            return None;
        }

        let mut contributions = BTreeMap::new();
        let mut weighted = 0.0;
        let mut total = 0.0;
        for marker in &selected {
            let weight = weights::marker_weight(marker, timestamp, self.window, &self.weights);
            weighted += weights::subtype_value(marker.subtype) * weight.abs();
            total += weight.abs();
            contributions.insert(marker.id.clone(), weight);
        }
        let value = if total > 0.0 {
            (weighted / total).clamp(-1.0, 1.0)
        } else {
            0.0
        };

        Some(RawSample {
            timestamp,
            value,
            confidence: self.sample_confidence(&selected),
            marker_ids: selected.iter().map(|m| m.id.clone()).collect(),
            contributions,
        })
    }

    fn sample_confidence(&self, selected: &[&MarkerEvent]) -> f64 {
        let quality = selected.iter().map(|m| m.confidence).mean();
        let quantity = (selected.len() as f64 / RAPPORT_MARKER_CAP as f64).min(1.0);
        let spread = if selected.len() > 1 {
            let first = selected
                .iter()
                .map(|m| m.start_time)
                .fold(f64::INFINITY, f64::min);
            let last = selected
                .iter()
                .map(|m| m.start_time)
                .fold(f64::NEG_INFINITY, f64::max);
            ((last - first) / self.window).min(1.0)
        } else {
            SINGLE_MARKER_SPREAD
        };
        (quality * QUALITY_SHARE + quantity * QUANTITY_SHARE + spread * SPREAD_SHARE).clamp(0.0, 1.0)
    }
}
