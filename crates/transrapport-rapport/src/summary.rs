//! Session-level rapport summary.

use std::fmt;

use serde::Serialize;
use statrs::statistics::Statistics;

use transrapport_core::constants::{KEY_MOMENT_THRESHOLD, MAX_KEY_MOMENTS, SESSION_SLOPE_THRESHOLD};
use transrapport_core::RapportIndicator;

/// Minimum indicators needed for a direction.
pub const MIN_SUMMARY_INDICATORS: usize = 3;

/// Overall direction of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionDirection {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl SessionDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "improving",
            Self::Declining => "declining",
            Self::Stable => "stable",
            Self::InsufficientData => "insufficient_data",
        }
    }
}

impl fmt::Display for SessionDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentKind {
    Increase,
    Decrease,
}

/// A large indicator-to-indicator change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyMoment {
    pub timestamp: f64,
    pub change: f64,
    pub value: f64,
    pub kind: MomentKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub direction: SessionDirection,
    /// Magnitude of the least-squares slope over indicator values.
    pub strength: f64,
    /// At most five moments, the largest by magnitude, in time order.
    pub key_moments: Vec<KeyMoment>,
    pub final_value: f64,
    pub average_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub average_confidence: f64,
    pub indicator_count: usize,
}

impl SessionSummary {
    fn insufficient(indicators: &[RapportIndicator]) -> Self {
        let values: Vec<f64> = indicators.iter().map(|i| i.value).collect();
        let (min_value, max_value, average_value, average_confidence) = if values.is_empty() {
            (0.0, 0.0, 0.0, 0.0)
        } else {
            (
                values.iter().copied().fold(f64::INFINITY, f64::min),
                values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                values.iter().mean(),
                indicators.iter().map(|i| i.confidence).mean(),
            )
        };
        Self {
            direction: SessionDirection::InsufficientData,
            strength: 0.0,
            key_moments: Vec::new(),
            final_value: values.last().copied().unwrap_or(0.0),
            average_value,
            min_value,
            max_value,
            average_confidence,
            indicator_count: indicators.len(),
        }
    }
}

/// Summarize a time-ordered rapport timeline.
pub fn summarize(indicators: &[RapportIndicator]) -> SessionSummary {
    if indicators.len() < MIN_SUMMARY_INDICATORS {
        return SessionSummary::insufficient(indicators);
    }

    let values: Vec<f64> = indicators.iter().map(|i| i.value).collect();
    let slope = index_slope(&values);
    let direction = if slope > SESSION_SLOPE_THRESHOLD {
        SessionDirection::Improving
    } else if slope < -SESSION_SLOPE_THRESHOLD {
        SessionDirection::Declining
    } else {
        SessionDirection::Stable
    };

    SessionSummary {
        direction,
        strength: slope.abs(),
        key_moments: key_moments(indicators),
        final_value: values[values.len() - 1],
        average_value: values.iter().mean(),
        min_value: values.iter().copied().fold(f64::INFINITY, f64::min),
        max_value: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        average_confidence: indicators.iter().map(|i| i.confidence).mean(),
        indicator_count: indicators.len(),
    }
}

/// Least-squares slope of `values` against their index.
fn index_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let x_mean = (n - 1) as f64 / 2.0;
    let y_mean = values.iter().mean();
    let (num, den) = values.iter().enumerate().fold((0.0, 0.0), |(num, den), (i, y)| {
        let dx = i as f64 - x_mean;
        (num + dx * (y - y_mean), den + dx * dx)
    });
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

fn key_moments(indicators: &[RapportIndicator]) -> Vec<KeyMoment> {
    let mut moments: Vec<KeyMoment> = indicators
        .windows(2)
        .filter_map(|pair| {
            let change = pair[1].value - pair[0].value;
            (change.abs() > KEY_MOMENT_THRESHOLD).then(|| KeyMoment {
                timestamp: pair[1].timestamp,
                change,
                value: pair[1].value,
                kind: if change > 0.0 {
                    MomentKind::Increase
                } else {
                    MomentKind::Decrease
                },
            })
        })
        .collect();

    // Largest first; the stable sort keeps time order among equal magnitudes.
    moments.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));
    moments.truncate(MAX_KEY_MOMENTS);
    moments.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));
    moments
}

#[cfg(test)]
mod tests {
    use transrapport_core::RapportTrend;

    use super::*;

    fn timeline(values: &[f64]) -> Vec<RapportIndicator> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                RapportIndicator::new(30.0 + i as f64 * 30.0, v, RapportTrend::Stable, 0.6, vec![], 60.0)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn fewer_than_three_is_insufficient() {
        let summary = summarize(&timeline(&[0.2, 0.9]));
        assert_eq!(summary.direction, SessionDirection::InsufficientData);
        assert_eq!(summary.strength, 0.0);
        assert!(summary.key_moments.is_empty());
        assert_eq!(summary.final_value, 0.9);
        assert_eq!(summary.indicator_count, 2);
    }

    #[test]
    fn empty_timeline_is_insufficient_with_zeros() {
        let summary = summarize(&[]);
        assert_eq!(summary.direction, SessionDirection::InsufficientData);
        assert_eq!(summary.average_value, 0.0);
        assert_eq!(summary.min_value, 0.0);
    }

    #[test]
    fn rising_timeline_improves() {
        let summary = summarize(&timeline(&[0.1, 0.2, 0.3, 0.4]));
        assert_eq!(summary.direction, SessionDirection::Improving);
        assert!((summary.strength - 0.1).abs() < 1e-9);
        assert!((summary.average_value - 0.25).abs() < 1e-9);
        assert_eq!(summary.min_value, 0.1);
        assert_eq!(summary.max_value, 0.4);
    }

    #[test]
    fn falling_timeline_declines() {
        let summary = summarize(&timeline(&[0.5, 0.3, 0.1]));
        assert_eq!(summary.direction, SessionDirection::Declining);
    }

    #[test]
    fn flat_timeline_is_stable() {
        let summary = summarize(&timeline(&[0.4, 0.41, 0.4, 0.41]));
        assert_eq!(summary.direction, SessionDirection::Stable);
    }

    #[test]
    fn key_moments_keep_five_largest_in_time_order() {
        let values = [0.0, 0.3, -0.1, 0.5, 0.0, 0.9, 0.0, 0.25, 0.0];
        let summary = summarize(&timeline(&values));
        let changes: Vec<f64> = summary.key_moments.iter().map(|m| m.change).collect();
        // Changes: +.3 -.4 +.6 -.5 +.9 -.9 +.25 -.25; the five largest by magnitude.
        assert_eq!(summary.key_moments.len(), 5);
        assert!(summary.key_moments.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        for expected in [-0.4, 0.6, -0.5, 0.9, -0.9] {
            assert!(changes.iter().any(|c| (c - expected).abs() < 1e-9), "{changes:?}");
        }
        assert_eq!(summary.key_moments[0].kind, MomentKind::Decrease);
    }
}
