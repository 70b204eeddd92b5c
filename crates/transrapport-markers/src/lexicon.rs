//! Case-insensitive, word-bounded phrase matching on an Aho-Corasick automaton.

use std::collections::BTreeSet;

use aho_corasick::{AhoCorasick, MatchKind};

use transrapport_core::errors::PatternError;

/// A compiled list of keyword phrases.
///
/// Phrases and text are both folded to lowercase before matching, and phrases
/// match only at word boundaries, so `"so"` does not fire inside `"also"`.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    phrases: Vec<String>,
    automaton: Option<AhoCorasick>,
}

impl KeywordSet {
    /// Build from raw phrases. Blank entries and duplicates are dropped.
    pub fn new<I, S>(owner: &str, phrases: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = BTreeSet::new();
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty() && seen.insert(p.clone()))
            .collect();

        let automaton = if phrases.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .match_kind(MatchKind::Standard)
                .build(&phrases)
                .map_err(|e| PatternError::KeywordIndex {
                    pattern_id: owner.to_string(),
                    message: e.to_string(),
                })?;
            Some(ac)
        };

        Ok(Self { phrases, automaton })
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Number of distinct phrases present in `text`.
    pub fn count_distinct(&self, text: &str) -> usize {
        self.matched_indices(text).len()
    }

    /// Whether at least one phrase is present in `text`.
    pub fn contains_any(&self, text: &str) -> bool {
        let Some(ac) = &self.automaton else {
            return false;
        };
        let text = text.to_lowercase();
        ac.find_overlapping_iter(&text)
            .any(|m| is_word_bounded(&text, m.start(), m.end()))
    }

    /// The phrases present in `text`, in declaration order.
    pub fn matched(&self, text: &str) -> Vec<&str> {
        self.matched_indices(text)
            .into_iter()
            .map(|i| self.phrases[i].as_str())
            .collect()
    }

    fn matched_indices(&self, text: &str) -> BTreeSet<usize> {
        let Some(ac) = &self.automaton else {
            return BTreeSet::new();
        };
        let text = text.to_lowercase();
        ac.find_overlapping_iter(&text)
            .filter(|m| is_word_bounded(&text, m.start(), m.end()))
            .map(|m| m.pattern().as_usize())
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text
        .get(..start)
        .and_then(|s| s.chars().next_back())
        .map_or(true, |c| !is_word_char(c));
    let after = text
        .get(end..)
        .and_then(|s| s.chars().next())
        .map_or(true, |c| !is_word_char(c));
    before && after
}

/// Fixed cue lists consulted when evaluating context requirements.
#[derive(Debug, Clone)]
pub struct CueLexicon {
    pub direction: KeywordSet,
    pub imperative: KeywordSet,
    pub interruption: KeywordSet,
    pub redirection: KeywordSet,
    pub sustained: KeywordSet,
    pub specificity: KeywordSet,
    pub directed: KeywordSet,
    pub complexity: KeywordSet,
    pub explanation: KeywordSet,
    pub individual_view: KeywordSet,
    pub discussion: KeywordSet,
    pub agreement: KeywordSet,
}

impl CueLexicon {
    pub fn new() -> Result<Self, PatternError> {
        Ok(Self {
            direction: cues("direction", &["focus", "look at", "pay attention", "notice", "consider"])?,
            imperative: cues(
                "imperative",
                &["you should", "i want you to", "please", "let's", "can you", "try to"],
            )?,
            interruption: cues("interruption", &["wait", "hold on", "actually", "but", "however"])?,
            redirection: cues("redirection", &["let me", "can we", "what if we", "what about", "instead"])?,
            sustained: cues("sustained", &["keep", "stay", "continue", "remain", "still", "maintain"])?,
            specificity: cues(
                "specificity",
                &["specifically", "particularly", "especially", "in particular", "precisely"],
            )?,
            directed: cues("directed", &["focus", "look", "notice", "attention", "see", "watch"])?,
            complexity: cues(
                "complexity",
                &["technical", "complex", "complicated", "difficult", "unclear", "confusing"],
            )?,
            explanation: cues("explanation", &["because", "therefore", "so", "thus", "hence"])?,
            individual_view: cues(
                "individual_view",
                &["i think", "i believe", "my view", "personally", "in my opinion"],
            )?,
            discussion: cues("discussion", &["discussed", "talked about", "mentioned", "said"])?,
            agreement: cues("agreement", &["agree", "exactly", "right", "correct", "yes"])?,
        })
    }
}

fn cues(name: &str, phrases: &[&str]) -> Result<KeywordSet, PatternError> {
    KeywordSet::new(&format!("cue:{name}"), phrases.iter().copied())
}
