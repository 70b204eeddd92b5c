//! Sample placement and window selection.

use transrapport_core::constants::{MAX_SAMPLE_INTERVAL, MIN_WINDOW_SECONDS};
use transrapport_core::MarkerEvent;

/// Slack for accumulated floating point error at the last sample.
const SAMPLE_EPSILON: f64 = 1e-9;

/// Spacing between samples: `min(30s, window / 2)`.
pub fn sample_interval(window: f64) -> f64 {
    MAX_SAMPLE_INTERVAL.min(window / 2.0)
}

/// Sample centres from `window / 2` up to `duration - window / 2` inclusive.
/// Empty when the session is shorter than one window or the window is below
/// [`MIN_WINDOW_SECONDS`].
pub fn sample_timestamps(duration: f64, window: f64) -> Vec<f64> {
    if !duration.is_finite() || !window.is_finite() || window < MIN_WINDOW_SECONDS {
        return Vec::new();
    }
    let half = window / 2.0;
    let last = duration - half;
    let step = sample_interval(window);

    (0..)
        .map(|i| half + i as f64 * step)
        .take_while(|t| *t <= last + SAMPLE_EPSILON)
        .collect()
}

/// Markers whose range touches `[timestamp - window/2, timestamp + window/2]`.
pub fn markers_in_window<'m>(
    markers: &'m [MarkerEvent],
    timestamp: f64,
    window: f64,
) -> Vec<&'m MarkerEvent> {
    let half = window / 2.0;
    markers
        .iter()
        .filter(|m| m.intersects_window(timestamp - half, timestamp + half))
        .collect()
}
