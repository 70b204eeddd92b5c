use proptest::prelude::*;

use transrapport_core::{MarkerCategory, MarkerEvent, MarkerSubtype, TranscriptSegment};
use transrapport_markers::relationships::resolve_overlaps;
use transrapport_markers::{CategoryEngine, EngineConfig, PatternRegistry, RelationshipProcessor};

const WORDS: &[&str] = &[
    "focus", "on", "this", "okay", "i", "see", "we", "agree", "remember", "when", "last", "time",
    "what", "do", "you", "mean", "exactly", "together", "actually", "the", "plan", "weather",
    "please", "notice", "understand", "now", "because", "right", "yes", "think",
];

fn arb_subtype() -> impl Strategy<Value = MarkerSubtype> {
    (0..MarkerSubtype::COUNT).prop_map(|i| MarkerSubtype::ALL[i])
}

fn arb_marker() -> impl Strategy<Value = (MarkerSubtype, f64, f64, f64)> {
    (arb_subtype(), 0.0f64..300.0, 0.5f64..20.0, 0.0f64..=1.0)
}

fn build(subtype: MarkerSubtype, start: f64, len: f64, confidence: f64) -> MarkerEvent {
    MarkerEvent::builder(subtype.category(), subtype, start, start + len)
        .confidence(confidence)
        .evidence(format!("{subtype} at {start:.2}"))
        .build()
        .unwrap()
}

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(WORDS), 0..12).prop_map(|w| w.join(" "))
}

fn arb_segments() -> impl Strategy<Value = Vec<TranscriptSegment>> {
    prop::collection::vec(
        (arb_text(), 0.5f64..20.0, 0.0f64..5.0, prop::option::of(0u8..3)),
        0..14,
    )
    .prop_map(|rows| {
        let mut t = 0.0;
        rows.into_iter()
            .map(|(text, len, gap, speaker)| {
                let label = speaker.map(|s| format!("S{s}"));
                let seg = TranscriptSegment::new(t, t + len, label.as_deref(), text);
                t += len + gap;
                seg
            })
            .collect()
    })
}

// ── Overlap resolution ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn resolved_markers_never_overlap(raw in prop::collection::vec(arb_marker(), 0..40)) {
        let markers: Vec<_> = raw.into_iter().map(|(s, st, len, c)| build(s, st, len, c)).collect();
        let out = resolve_overlaps(markers);
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                prop_assert!(!a.overlaps_with(b), "{} overlaps {}", a.id, b.id);
            }
        }
        prop_assert!(out.windows(2).all(|w| w[0].start_time <= w[1].start_time));
    }

    #[test]
    fn post_processing_is_idempotent(raw in prop::collection::vec(arb_marker(), 0..40)) {
        let processor = RelationshipProcessor::new();
        let markers: Vec<_> = raw.into_iter().map(|(s, st, len, c)| build(s, st, len, c)).collect();
        let once = processor.process(markers);
        let twice = processor.process(once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn links_are_bidirectional(raw in prop::collection::vec(arb_marker(), 0..40)) {
        let out = RelationshipProcessor::new().process(
            raw.into_iter().map(|(s, st, len, c)| build(s, st, len, c)).collect(),
        );
        for marker in &out {
            for related in &marker.related_markers {
                let other = out.iter().find(|m| &m.id == related);
                prop_assert!(other.is_some_and(|o| o.is_related_to(&marker.id)));
            }
        }
    }
}

// ── Engine output bounds ─────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn engine_respects_threshold_and_bounds(
        segments in arb_segments(),
        threshold in 0.0f64..=1.0,
    ) {
        let registry = PatternRegistry::builtin().unwrap();
        let config = EngineConfig { confidence_threshold: threshold, ..EngineConfig::default() };
        for category in MarkerCategory::ALL {
            let engine = CategoryEngine::new(category, &registry, config.clone()).unwrap();
            let markers = engine.analyze(&segments);
            for m in &markers {
                prop_assert_eq!(m.category, category);
                prop_assert_eq!(m.subtype.category(), category);
                prop_assert!((0.0..=1.0).contains(&m.confidence));
                prop_assert!(m.confidence >= threshold);
                prop_assert!(m.start_time <= m.end_time);
                prop_assert!(!m.evidence.is_empty());
                prop_assert!(!m.explanation.is_empty());
            }
            for (i, a) in markers.iter().enumerate() {
                for b in &markers[i + 1..] {
                    prop_assert!(!a.overlaps_with(b));
                }
            }
        }
    }

    #[test]
    fn engine_output_is_deterministic(segments in arb_segments()) {
        let registry = PatternRegistry::builtin().unwrap();
        for category in MarkerCategory::ALL {
            let engine = CategoryEngine::new(category, &registry, EngineConfig::default()).unwrap();
            prop_assert_eq!(engine.analyze(&segments), engine.analyze(&segments));
        }
    }
}
