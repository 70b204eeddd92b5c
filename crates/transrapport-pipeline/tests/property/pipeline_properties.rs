use proptest::prelude::*;

use test_fixtures::synthetic_session;
use transrapport_core::{AnalysisConfig, MarkerCategory, TranscriptSegment};
use transrapport_pipeline::AnalysisPipeline;

const WORDS: [&str; 16] = [
    "focus", "see", "agree", "remember", "we", "together", "because", "exactly", "plan",
    "weather", "listen", "mean", "talked", "about", "so", "right",
];

fn arb_segments() -> impl Strategy<Value = Vec<TranscriptSegment>> {
    prop::collection::vec(
        (
            prop::sample::select(vec!["A", "B", "C"]),
            prop::collection::vec(prop::sample::select(WORDS.to_vec()), 0..8),
            0.5f64..20.0,
        ),
        0..25,
    )
    .prop_map(|rows| {
        let mut t = 0.0;
        rows.into_iter()
            .map(|(speaker, words, len)| {
                let seg = TranscriptSegment::new(t, t + len, Some(speaker), words.join(" "));
                t += len + 1.0;
                seg
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn output_respects_threshold_and_order(
        segments in arb_segments(),
        threshold in 0.3f64..=0.95,
    ) {
        let config = AnalysisConfig { confidence_threshold: threshold, ..AnalysisConfig::default() };
        let pipeline = AnalysisPipeline::new(config).unwrap();
        let results = pipeline.run(&segments).unwrap();

        prop_assert_eq!(results.metadata.marker_count, results.markers.len());
        prop_assert!(results.markers.windows(2).all(|w| w[0].start_time <= w[1].start_time));
        for marker in &results.markers {
            prop_assert!(marker.confidence >= threshold);
            prop_assert!(marker.confidence <= 1.0);
            prop_assert!(marker.start_time <= marker.end_time);
        }
        for indicator in &results.rapport {
            prop_assert!((-1.0..=1.0).contains(&indicator.value));
            prop_assert!((0.0..=1.0).contains(&indicator.confidence));
        }
        let total: usize = results.metadata.per_category_counts.values().sum();
        prop_assert_eq!(total, results.markers.len());
        prop_assert!(pipeline.validate_results(&results, false).is_valid());
    }

    #[test]
    fn runs_are_reproducible(segments in arb_segments()) {
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).unwrap();
        let a = pipeline.run(&segments).unwrap();
        let b = pipeline.run(&segments).unwrap();
        prop_assert_eq!(a.markers, b.markers);
        prop_assert_eq!(a.rapport, b.rapport);
    }

    #[test]
    fn selective_run_matches_full_run(n in 0usize..40) {
        let segments = synthetic_session(n);
        let pipeline = AnalysisPipeline::new(AnalysisConfig::default()).unwrap();
        let full = pipeline.run(&segments).unwrap();
        let selected = pipeline.run_categories(&segments, &MarkerCategory::ALL);
        for category in MarkerCategory::ALL {
            let from_full: Vec<_> = full.markers_of(category).cloned().collect();
            let mut from_selected = selected[&category].clone();
            from_selected.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
            prop_assert_eq!(from_full, from_selected);
        }
    }
}
