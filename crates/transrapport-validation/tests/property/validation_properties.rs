use proptest::prelude::*;

use transrapport_core::{MarkerEvent, MarkerSubtype};
use transrapport_validation::{MarkerValidator, ValidatorConfig};

fn arb_marker() -> impl Strategy<Value = MarkerEvent> {
    (
        (0..MarkerSubtype::COUNT).prop_map(|i| MarkerSubtype::ALL[i]),
        0.0f64..300.0,
        0.0f64..10.0,
        0.0f64..=1.0,
        prop::option::of(0u8..3),
    )
        .prop_map(|(subtype, start, len, confidence, speaker)| {
            MarkerEvent::builder(subtype.category(), subtype, start, start + len)
                .confidence(confidence)
                .evidence("evidence")
                .explanation("explanation")
                .speaker(speaker.map(|s| format!("S{s}")))
                .build()
                .unwrap()
        })
}

proptest! {
    #[test]
    fn validation_never_mutates(markers in prop::collection::vec(arb_marker(), 0..25), strict in any::<bool>()) {
        let before = markers.clone();
        let validator = MarkerValidator::new(ValidatorConfig { strict, ..ValidatorConfig::default() });
        let report = validator.validate_markers(&markers);
        prop_assert_eq!(&markers, &before);
        prop_assert_eq!(report.is_valid(), report.errors.is_empty());
        prop_assert_eq!(report.checked_markers, markers.len());
    }

    #[test]
    fn threshold_findings_match_low_markers(markers in prop::collection::vec(arb_marker(), 0..25)) {
        let report = MarkerValidator::default().validate_markers(&markers);
        let low = markers.iter().filter(|m| m.confidence < 0.7).count();
        prop_assert_eq!(report.errors.len(), low);
    }

    #[test]
    fn strict_mode_only_adds_findings(markers in prop::collection::vec(arb_marker(), 0..25)) {
        let lax = MarkerValidator::default().validate_markers(&markers);
        let strict = MarkerValidator::new(ValidatorConfig { strict: true, ..ValidatorConfig::default() })
            .validate_markers(&markers);
        prop_assert!(strict.errors.len() >= lax.errors.len());
        for e in &lax.errors {
            prop_assert!(strict.errors.contains(e));
        }
    }
}
