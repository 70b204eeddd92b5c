//! Exponential smoothing and short-horizon trend classification.

use statrs::statistics::Statistics;

use transrapport_core::constants::{
    TREND_DELTA_THRESHOLD, TREND_HISTORY, TREND_VOLATILITY_THRESHOLD,
};
use transrapport_core::RapportTrend;

/// `previous × factor + raw × (1 − factor)`.
pub fn smooth(previous: f64, raw: f64, factor: f64) -> f64 {
    previous * factor + raw * (1.0 - factor)
}

/// Smooth a whole series. The first value passes through unchanged.
pub fn smooth_series(raw: &[f64], factor: f64) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::with_capacity(raw.len());
    for &value in raw {
        let next = match out.last() {
            Some(&previous) => smooth(previous, value, factor),
            None => value,
        };
        out.push(next);
    }
    out
}

/// Classify `current` against up to three prior smoothed values.
///
/// Fewer than two prior values is always [`RapportTrend::Stable`].
pub fn classify_trend(history: &[f64], current: f64) -> RapportTrend {
    if history.len() < 2 {
        return RapportTrend::Stable;
    }
    let recent = &history[history.len().saturating_sub(TREND_HISTORY)..];
    let values: Vec<f64> = recent.iter().copied().chain(std::iter::once(current)).collect();
    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();

    let mean = deltas.iter().mean();
    let variance = deltas.iter().population_variance();

    if variance > TREND_VOLATILITY_THRESHOLD {
        RapportTrend::Volatile
    } else if mean > TREND_DELTA_THRESHOLD {
        RapportTrend::Increasing
    } else if mean < -TREND_DELTA_THRESHOLD {
        RapportTrend::Decreasing
    } else {
        RapportTrend::Stable
    }
}

/// Trend for every point of `series`, each judged against its predecessors.
pub fn classify_series(series: &[f64]) -> Vec<RapportTrend> {
    series
        .iter()
        .enumerate()
        .map(|(i, &value)| classify_trend(&series[..i], value))
        .collect()
}
