//! Pattern registry: per-category detection rules loaded from TOML.

pub mod defaults;
pub mod pattern;
pub mod requirement;
pub mod toml_patterns;

use std::collections::BTreeMap;
use std::path::Path;

use transrapport_core::errors::{PatternError, PatternWarning};
use transrapport_core::MarkerCategory;

pub use pattern::{DetectionPattern, LexicalHits};
pub use requirement::ContextRequirement;
pub use toml_patterns::{LoadedPatterns, TomlPatternDef, TomlPatternFile, TomlPatternLoader};

/// Detection patterns grouped by category, plus any rules skipped on load.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: BTreeMap<MarkerCategory, Vec<DetectionPattern>>,
    warnings: Vec<PatternWarning>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The 20 built-in patterns (five per category).
    pub fn builtin() -> Result<Self, PatternError> {
        let mut registry = Self::new();
        for (source_name, text) in defaults::BUILTIN_SOURCES {
            registry.extend(TomlPatternLoader::load_from_str(source_name, text)?);
        }
        tracing::debug!(
            pattern_count = registry.len(),
            warnings = registry.warnings.len(),
            "loaded built-in pattern registry"
        );
        Ok(registry)
    }

    /// Load every `*.toml` file in `dir`, in file-name order.
    pub fn from_dir(dir: &Path) -> Result<Self, PatternError> {
        let entries = std::fs::read_dir(dir).map_err(|e| PatternError::Io {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PatternError::Io {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                files.push(path);
            }
        }
        files.sort();

        let mut registry = Self::new();
        for path in &files {
            registry.extend(TomlPatternLoader::load_from_file(path)?);
        }
        tracing::info!(
            dir = %dir.display(),
            files = files.len(),
            pattern_count = registry.len(),
            warnings = registry.warnings.len(),
            "loaded pattern registry from directory"
        );
        Ok(registry)
    }

    /// Load from a single TOML string.
    pub fn from_toml_str(source_name: &str, toml_str: &str) -> Result<Self, PatternError> {
        let mut registry = Self::new();
        registry.extend(TomlPatternLoader::load_from_str(source_name, toml_str)?);
        Ok(registry)
    }

    /// Add compiled patterns and their warnings.
    pub fn extend(&mut self, loaded: LoadedPatterns) {
        for pattern in loaded.patterns {
            self.insert(pattern);
        }
        self.warnings.extend(loaded.warnings);
    }

    pub fn insert(&mut self, pattern: DetectionPattern) {
        self.patterns.entry(pattern.category).or_default().push(pattern);
    }

    /// Patterns for `category`, in load order.
    pub fn load(&self, category: MarkerCategory) -> &[DetectionPattern] {
        self.patterns.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn get(&self, pattern_id: &str) -> Option<&DetectionPattern> {
        self.patterns.values().flatten().find(|p| p.id == pattern_id)
    }

    pub fn warnings(&self) -> &[PatternWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.patterns.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pattern count per category, zero entries omitted.
    pub fn counts(&self) -> BTreeMap<MarkerCategory, usize> {
        self.patterns
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(c, v)| (*c, v.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn builtin_has_five_patterns_per_category() {
        let registry = PatternRegistry::builtin().unwrap();
        assert!(registry.warnings().is_empty(), "{:?}", registry.warnings());
        assert_eq!(registry.len(), 20);
        for category in MarkerCategory::ALL {
            let patterns = registry.load(category);
            assert_eq!(patterns.len(), 5, "{category}");
            assert!(patterns.iter().all(|p| p.subtype.category() == category));
            let subtypes: std::collections::BTreeSet<_> = patterns.iter().map(|p| p.subtype).collect();
            assert_eq!(subtypes.len(), 5);
        }
    }

    #[test]
    fn from_dir_reads_only_toml_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut toml = std::fs::File::create(dir.path().join("extra.toml")).unwrap();
        writeln!(
            toml,
            "[[patterns]]\nid = \"x\"\ncategory = \"memory\"\nsubtype = \"memory_reference\"\nkeywords = [\"recall\"]"
        )
        .unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a pattern").unwrap();

        let registry = PatternRegistry::from_dir(dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.load(MarkerCategory::Attention).is_empty());
        assert_eq!(registry.get("x").map(|p| p.category), Some(MarkerCategory::Memory));
    }

    #[test]
    fn missing_dir_is_io_error() {
        let err = PatternRegistry::from_dir(Path::new("/no/such/pattern/dir")).unwrap_err();
        assert!(matches!(err, PatternError::Io { .. }));
    }
}
