//! Declarative TOML pattern definitions, user-extensible without recompiling.
//!
//! ```toml
//! [[patterns]]
//! id = "ato_direction_focus"
//! category = "attention"
//! subtype = "attention_direction"
//! weight = 0.9
//! keywords = ["focus", "pay attention"]
//! regex = ['\bfocus\s+on\b']
//!
//! [patterns.context]
//! imperative_mood = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

use transrapport_core::constants::DEFAULT_PATTERN_WEIGHT;
use transrapport_core::errors::{PatternError, PatternWarning};
use transrapport_core::{MarkerCategory, MarkerSubtype};

use super::pattern::DetectionPattern;
use super::requirement::ContextRequirement;
use crate::lexicon::KeywordSet;

/// A TOML-defined pattern, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlPatternDef {
    pub id: String,
    pub category: String,
    pub subtype: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub regex: Vec<String>,
    #[serde(default)]
    pub context: BTreeMap<String, bool>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

fn default_weight() -> f64 {
    DEFAULT_PATTERN_WEIGHT
}

/// A file of `[[patterns]]` entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlPatternFile {
    #[serde(default)]
    pub patterns: Vec<TomlPatternDef>,
}

/// Compiled patterns from one source plus the rules that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedPatterns {
    pub patterns: Vec<DetectionPattern>,
    pub warnings: Vec<PatternWarning>,
}

/// Loader for TOML pattern definitions.
pub struct TomlPatternLoader;

impl TomlPatternLoader {
    /// Parse and compile every pattern in `toml_str`.
    ///
    /// A document that fails to parse is an error. A single rule that fails
    /// to compile is skipped and reported in `warnings`.
    pub fn load_from_str(source_name: &str, toml_str: &str) -> Result<LoadedPatterns, PatternError> {
        let file: TomlPatternFile = toml::from_str(toml_str).map_err(|e| PatternError::Parse {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;

        let mut loaded = LoadedPatterns::default();
        for def in file.patterns {
            if def.enabled == Some(false) {
                tracing::debug!(pattern_id = %def.id, source = source_name, "pattern disabled");
                continue;
            }
            match Self::compile(def) {
                Ok(pattern) => loaded.patterns.push(pattern),
                Err(err) => {
                    tracing::warn!(source = source_name, error = %err, "skipping malformed pattern");
                    loaded.warnings.push(PatternWarning::from_error(source_name, &err));
                }
            }
        }
        Ok(loaded)
    }

    pub fn load_from_file(path: &Path) -> Result<LoadedPatterns, PatternError> {
        let content = std::fs::read_to_string(path).map_err(|e| PatternError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::load_from_str(&path.display().to_string(), &content)
    }

    /// Validate and compile one definition.
    pub fn compile(def: TomlPatternDef) -> Result<DetectionPattern, PatternError> {
        let category =
            MarkerCategory::parse_str(&def.category).ok_or_else(|| PatternError::UnknownCategory {
                pattern_id: def.id.clone(),
                category: def.category.clone(),
            })?;

        let subtype =
            MarkerSubtype::parse_str(&def.subtype).ok_or_else(|| PatternError::UnknownSubtype {
                pattern_id: def.id.clone(),
                subtype: def.subtype.clone(),
            })?;

        if subtype.category() != category {
            return Err(PatternError::SubtypeCategoryMismatch {
                pattern_id: def.id,
                subtype: subtype.as_str().to_string(),
                category: category.as_str().to_string(),
            });
        }

        if !def.weight.is_finite() || !(0.0..=1.0).contains(&def.weight) {
            return Err(PatternError::InvalidWeight {
                pattern_id: def.id,
                weight: def.weight,
            });
        }

        let mut requirements = BTreeMap::new();
        for (name, expected) in &def.context {
            let requirement =
                ContextRequirement::parse_str(name).ok_or_else(|| PatternError::UnknownRequirement {
                    pattern_id: def.id.clone(),
                    requirement: name.clone(),
                })?;
            requirements.insert(requirement, *expected);
        }

        let mut regexes = Vec::with_capacity(def.regex.len());
        for source in def.regex.iter().filter(|s| !s.trim().is_empty()) {
            let re = RegexBuilder::new(source)
                .case_insensitive(true)
                .build()
                .map_err(|e| PatternError::InvalidRegex {
                    pattern_id: def.id.clone(),
                    message: e.to_string(),
                })?;
            regexes.push(re);
        }

        let keywords = KeywordSet::new(&def.id, &def.keywords)?;

        if keywords.is_empty() && regexes.is_empty() {
            return Err(PatternError::EmptyPattern { pattern_id: def.id });
        }

        Ok(DetectionPattern {
            id: def.id,
            category,
            subtype,
            keywords,
            regexes,
            weight: def.weight,
            requirements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_GOOD_ONE_BAD: &str = r#"
[[patterns]]
id = "good"
category = "semantic"
subtype = "semantic_alignment"
keywords = ["exactly"]
regex = ['\bI agree\b']

[patterns.context]
speaker_change = true

[[patterns]]
id = "bad_regex"
category = "semantic"
subtype = "semantic_alignment"
regex = ['(unclosed']
"#;

    #[test]
    fn invalid_regex_is_skipped_with_warning() {
        let loaded = TomlPatternLoader::load_from_str("inline", ONE_GOOD_ONE_BAD).unwrap();
        assert_eq!(loaded.patterns.len(), 1);
        assert_eq!(loaded.patterns[0].id, "good");
        assert_eq!(loaded.patterns[0].weight, DEFAULT_PATTERN_WEIGHT);
        assert_eq!(
            loaded.patterns[0].requirements.get(&ContextRequirement::SpeakerChange),
            Some(&true)
        );
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].pattern_id, "bad_regex");
    }

    #[test]
    fn unparseable_document_is_an_error() {
        let err = TomlPatternLoader::load_from_str("inline", "[[patterns]\nid=").unwrap_err();
        assert!(matches!(err, PatternError::Parse { .. }));
    }

    fn def(category: &str, subtype: &str) -> TomlPatternDef {
        TomlPatternDef {
            id: "p".into(),
            category: category.into(),
            subtype: subtype.into(),
            weight: 0.8,
            keywords: vec!["we".into()],
            regex: vec![],
            context: BTreeMap::new(),
            enabled: None,
        }
    }

    #[test]
    fn subtype_must_belong_to_category() {
        let err = TomlPatternLoader::compile(def("memory", "cluster_formation")).unwrap_err();
        assert!(matches!(err, PatternError::SubtypeCategoryMismatch { .. }));
    }

    #[test]
    fn category_codes_accepted() {
        let p = TomlPatternLoader::compile(def("CLU", "cluster_formation")).unwrap();
        assert_eq!(p.category, MarkerCategory::Cluster);
    }

    #[test]
    fn unknown_requirement_rejected() {
        let mut d = def("cluster", "cluster_formation");
        d.context.insert("vibes".into(), true);
        assert!(matches!(
            TomlPatternLoader::compile(d),
            Err(PatternError::UnknownRequirement { .. })
        ));
    }

    #[test]
    fn weight_and_emptiness_checked() {
        let mut heavy = def("cluster", "cluster_formation");
        heavy.weight = 1.5;
        assert!(matches!(
            TomlPatternLoader::compile(heavy),
            Err(PatternError::InvalidWeight { .. })
        ));

        let mut empty = def("cluster", "cluster_formation");
        empty.keywords.clear();
        assert!(matches!(
            TomlPatternLoader::compile(empty),
            Err(PatternError::EmptyPattern { .. })
        ));
    }

    #[test]
    fn disabled_patterns_are_dropped_silently() {
        let src = r#"
[[patterns]]
id = "off"
category = "memory"
subtype = "memory_reference"
keywords = ["remember"]
enabled = false
"#;
        let loaded = TomlPatternLoader::load_from_str("inline", src).unwrap();
        assert!(loaded.patterns.is_empty());
        assert!(loaded.warnings.is_empty());
    }
}
