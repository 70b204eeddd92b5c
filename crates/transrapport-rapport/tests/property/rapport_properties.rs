use proptest::prelude::*;

use transrapport_core::{MarkerEvent, MarkerSubtype};
use transrapport_rapport::{classify_trend, smooth_series, summarize, RapportCalculator};

fn arb_marker() -> impl Strategy<Value = MarkerEvent> {
    (
        (0..MarkerSubtype::COUNT).prop_map(|i| MarkerSubtype::ALL[i]),
        0.0f64..600.0,
        0.5f64..15.0,
        0.0f64..=1.0,
    )
        .prop_map(|(subtype, start, len, confidence)| {
            MarkerEvent::builder(subtype.category(), subtype, start, start + len)
                .confidence(confidence)
                .evidence("evidence")
                .build()
                .unwrap()
        })
}

proptest! {
    #[test]
    fn indicators_stay_in_bounds(
        markers in prop::collection::vec(arb_marker(), 0..30),
        window in 10.0f64..120.0,
        smoothing in 0.0f64..=1.0,
    ) {
        let duration = markers.iter().map(|m| m.end_time).fold(0.0, f64::max);
        let out = RapportCalculator::new(window, smoothing).calculate(&markers, duration).unwrap();
        for indicator in &out {
            prop_assert!((-1.0..=1.0).contains(&indicator.value));
            prop_assert!((0.0..=1.0).contains(&indicator.confidence));
            prop_assert!(!indicator.contributing_markers.is_empty());
            for id in &indicator.contributing_markers {
                prop_assert!(markers.iter().any(|m| &m.id == id));
            }
        }
        prop_assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn calculation_is_deterministic(markers in prop::collection::vec(arb_marker(), 0..30)) {
        let calc = RapportCalculator::default();
        prop_assert_eq!(calc.calculate(&markers, 600.0).unwrap(), calc.calculate(&markers, 600.0).unwrap());
    }

    #[test]
    fn smoothing_never_leaves_the_raw_range(
        raw in prop::collection::vec(-1.0f64..=1.0, 1..20),
        factor in 0.0f64..=1.0,
    ) {
        let smoothed = smooth_series(&raw, factor);
        let lo = raw.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(smoothed.len(), raw.len());
        prop_assert_eq!(smoothed[0], raw[0]);
        for v in smoothed {
            prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
        }
    }

    #[test]
    fn trend_ignores_history_beyond_three(
        old in prop::collection::vec(-1.0f64..=1.0, 0..10),
        recent in prop::collection::vec(-1.0f64..=1.0, 3),
        current in -1.0f64..=1.0,
    ) {
        let mut full = old;
        full.extend_from_slice(&recent);
        prop_assert_eq!(classify_trend(&full, current), classify_trend(&recent, current));
    }

    #[test]
    fn summary_bounds_hold(markers in prop::collection::vec(arb_marker(), 1..30)) {
        let out = RapportCalculator::default().calculate(&markers, 600.0).unwrap();
        let summary = summarize(&out);
        prop_assert!(summary.key_moments.len() <= 5);
        prop_assert!(summary.min_value <= summary.max_value);
        prop_assert!(summary.average_value >= summary.min_value - 1e-12);
        prop_assert!(summary.average_value <= summary.max_value + 1e-12);
    }
}
