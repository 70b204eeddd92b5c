//! Sub-score computation for candidate patterns.

use std::collections::BTreeMap;

use transrapport_core::constants::{
    KEYWORD_SHARE, LEXICAL_SATURATION, MAX_MARKER_DURATION, MIN_MARKER_DURATION,
    NEUTRAL_CONTEXT_SCORE, TEMPORAL_IN_RANGE, TEMPORAL_OUT_OF_RANGE,
};

use crate::context::SegmentContext;
use crate::lexicon::CueLexicon;
use crate::registry::{ContextRequirement, LexicalHits};

/// Fraction of a list that matched, saturating at [`LEXICAL_SATURATION`] hits.
pub fn coverage(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let denom = total.min(LEXICAL_SATURATION) as f64;
    (hits as f64 / denom).min(1.0)
}

/// Keyword and regex coverage blended 55/45. A pattern that declares only
/// one kind of cue is scored on that kind alone.
pub fn lexical_score(hits: &LexicalHits) -> f64 {
    let keywords = coverage(hits.keyword_hits, hits.keyword_total);
    let regexes = coverage(hits.regex_hits, hits.regex_total);
    match (hits.keyword_total, hits.regex_total) {
        (0, 0) => 0.0,
        (_, 0) => keywords,
        (0, _) => regexes,
        _ => KEYWORD_SHARE * keywords + (1.0 - KEYWORD_SHARE) * regexes,
    }
}

/// Outcome of checking a pattern's declared requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEvaluation {
    pub score: f64,
    /// Requirements whose observed value matched the expectation.
    pub satisfied: Vec<ContextRequirement>,
}

pub fn contextual_score(
    requirements: &BTreeMap<ContextRequirement, bool>,
    ctx: &SegmentContext<'_>,
    cues: &CueLexicon,
) -> ContextEvaluation {
    if requirements.is_empty() {
        return ContextEvaluation {
            score: NEUTRAL_CONTEXT_SCORE,
            satisfied: Vec::new(),
        };
    }
    let satisfied: Vec<_> = requirements
        .iter()
        .filter(|(req, expected)| req.observe(ctx, cues) == **expected)
        .map(|(req, _)| *req)
        .collect();
    ContextEvaluation {
        score: satisfied.len() as f64 / requirements.len() as f64,
        satisfied,
    }
}

/// Soft plausibility check on utterance duration.
pub fn temporal_score(duration: f64) -> f64 {
    if (MIN_MARKER_DURATION..=MAX_MARKER_DURATION).contains(&duration) {
        TEMPORAL_IN_RANGE
    } else {
        TEMPORAL_OUT_OF_RANGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_saturates_at_two() {
        assert_eq!(coverage(0, 6), 0.0);
        assert_eq!(coverage(1, 6), 0.5);
        assert_eq!(coverage(2, 6), 1.0);
        assert_eq!(coverage(5, 6), 1.0);
        assert_eq!(coverage(1, 1), 1.0);
        assert_eq!(coverage(3, 0), 0.0);
    }

    #[test]
    fn lexical_blend() {
        let hits = LexicalHits {
            keyword_hits: 1,
            keyword_total: 6,
            regex_hits: 2,
            regex_total: 3,
        };
        assert!((lexical_score(&hits) - (0.55 * 0.5 + 0.45)).abs() < 1e-12);

        let keywords_only = LexicalHits {
            keyword_hits: 2,
            keyword_total: 4,
            ..Default::default()
        };
        assert_eq!(lexical_score(&keywords_only), 1.0);
    }

    #[test]
    fn temporal_bounds_inclusive() {
        assert_eq!(temporal_score(1.0), 1.0);
        assert_eq!(temporal_score(15.0), 1.0);
        assert_eq!(temporal_score(0.5), 0.5);
        assert_eq!(temporal_score(40.0), 0.5);
    }
}
