//! Compiled detection patterns.

use std::collections::BTreeMap;

use regex::Regex;

use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::requirement::ContextRequirement;
use crate::lexicon::KeywordSet;

/// One validated, compiled detection rule.
#[derive(Debug, Clone)]
pub struct DetectionPattern {
    pub id: String,
    pub category: MarkerCategory,
    pub subtype: MarkerSubtype,
    pub keywords: KeywordSet,
    pub regexes: Vec<Regex>,
    /// Base confidence weight in [0, 1].
    pub weight: f64,
    /// Declared requirements and the value each expects.
    pub requirements: BTreeMap<ContextRequirement, bool>,
}

/// Raw lexical hits of one pattern against one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexicalHits {
    pub keyword_hits: usize,
    pub keyword_total: usize,
    pub regex_hits: usize,
    pub regex_total: usize,
}

impl LexicalHits {
    /// Only patterns with at least one hit are scored.
    pub fn is_candidate(&self) -> bool {
        self.keyword_hits > 0 || self.regex_hits > 0
    }
}

impl DetectionPattern {
    pub fn match_text(&self, text: &str) -> LexicalHits {
        LexicalHits {
            keyword_hits: self.keywords.count_distinct(text),
            keyword_total: self.keywords.len(),
            regex_hits: self.regexes.iter().filter(|re| re.is_match(text)).count(),
            regex_total: self.regexes.len(),
        }
    }

    pub fn regex_sources(&self) -> Vec<&str> {
        self.regexes.iter().map(Regex::as_str).collect()
    }
}
