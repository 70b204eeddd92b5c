//! Rapport timeline behaviour over hand-built marker lists.

use transrapport_core::{AnalysisConfig, MarkerEvent, MarkerSubtype, RapportTrend};
use transrapport_rapport::{
    classify_trend, smooth_series, summarize, RapportCalculator, SessionDirection,
};

fn marker(subtype: MarkerSubtype, start: f64, end: f64, confidence: f64) -> MarkerEvent {
    MarkerEvent::builder(subtype.category(), subtype, start, end)
        .confidence(confidence)
        .evidence(format!("{subtype} evidence"))
        .speaker(Some("A".to_string()))
        .build()
        .unwrap()
}

/// Markers matching the therapy session fixture's detections.
fn therapy_markers() -> Vec<MarkerEvent> {
    vec![
        marker(MarkerSubtype::AttentionDirection, 0.0, 5.0, 0.855),
        marker(MarkerSubtype::AttentionAcknowledgment, 15.0, 20.0, 0.8415),
        marker(MarkerSubtype::MemoryReference, 150.0, 158.0, 0.873),
        marker(MarkerSubtype::MemoryAlignment, 160.0, 166.0, 0.7565),
    ]
}

#[test]
fn therapy_timeline_skips_quiet_middle() {
    let calc = RapportCalculator::from_config(&AnalysisConfig::default());
    let out = calc.calculate(&therapy_markers(), 166.0).unwrap();

    let stamps: Vec<f64> = out.iter().map(|i| i.timestamp).collect();
    assert_eq!(stamps, vec![30.0, 120.0]);

    assert!((out[0].value - 0.642).abs() < 1e-3, "{}", out[0].value);
    // 120 sees only the memory reference (inclusive window edge at 150).
    let expected = out[0].value * 0.3 + 0.4 * 0.7;
    assert!((out[1].value - expected).abs() < 1e-9);
    assert_eq!(out[1].contributing_markers.len(), 1);
    assert!(out.iter().all(|i| i.trend == RapportTrend::Stable));
    assert!(out.iter().all(|i| i.calculation_window == 60.0));
}

#[test]
fn identical_inputs_give_identical_timelines() {
    let calc = RapportCalculator::default();
    let a = calc.calculate(&therapy_markers(), 166.0).unwrap();
    let b = calc.calculate(&therapy_markers(), 166.0).unwrap();
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

#[test]
fn input_order_does_not_matter() {
    let calc = RapportCalculator::default();
    let mut reversed = therapy_markers();
    reversed.reverse();
    assert_eq!(
        calc.calculate(&therapy_markers(), 166.0).unwrap(),
        calc.calculate(&reversed, 166.0).unwrap()
    );
}

#[test]
fn increasingly_positive_session_improves() {
    // Markers every 10s, progressively more positive subtypes.
    let subtypes = [
        MarkerSubtype::AttentionShift,
        MarkerSubtype::AttentionDirection,
        MarkerSubtype::MemoryReference,
        MarkerSubtype::AttentionFocus,
        MarkerSubtype::SemanticExpansion,
        MarkerSubtype::AttentionAcknowledgment,
        MarkerSubtype::MemoryAlignment,
        MarkerSubtype::SemanticAlignment,
        MarkerSubtype::ClusterReinforcement,
        MarkerSubtype::SemanticUnderstanding,
    ];
    let markers: Vec<_> = subtypes
        .iter()
        .enumerate()
        .flat_map(|(i, s)| {
            let base = i as f64 * 30.0;
            [
                marker(*s, base, base + 4.0, 0.8),
                marker(*s, base + 10.0, base + 14.0, 0.8),
                marker(*s, base + 20.0, base + 24.0, 0.8),
            ]
        })
        .collect();

    let calc = RapportCalculator::new(60.0, 0.3);
    let out = calc.calculate(&markers, 300.0).unwrap();
    assert!(!out.is_empty());
    assert!(out.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
    assert!(out.last().unwrap().value > out[0].value);
    assert!(out.iter().any(|i| i.trend == RapportTrend::Increasing));

    let summary = summarize(&out);
    assert_eq!(summary.direction, SessionDirection::Improving);
    assert!(summary.strength > 0.02);
    assert_eq!(summary.indicator_count, out.len());
}

#[test]
fn smoothing_scenarios() {
    let smoothed = smooth_series(&[0.8, -0.6, 0.8, -0.6], 0.5);
    assert_eq!(classify_trend(&smoothed[..3], smoothed[3]), RapportTrend::Volatile);
    assert_eq!(classify_trend(&[0.1, 0.2, 0.35], 0.5), RapportTrend::Increasing);
}

#[test]
fn summary_serializes_with_snake_case_direction() {
    let calc = RapportCalculator::default();
    let out = calc.calculate(&therapy_markers(), 166.0).unwrap();
    let summary = summarize(&out);
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["direction"], "insufficient_data");
    assert_eq!(json["indicator_count"], 2);
}
