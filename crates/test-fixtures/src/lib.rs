//! Test fixture loader for TransRapport transcript scenarios.
//!
//! Fixtures live in `test-fixtures/transcripts/*.json` at the workspace root
//! and are shared by the tests and benches of every crate.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use transrapport_core::TranscriptSegment;

/// Root directory of the shared fixture data.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    // Walk up from the calling crate to the workspace root.
    while !path.join("test-fixtures").join("transcripts").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures/transcripts from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// All transcript fixture files, sorted by name.
pub fn list_transcripts() -> Vec<PathBuf> {
    let dir = fixtures_root().join("transcripts");
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// A transcript scenario with the markers it is known to produce.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptFixture {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub segments: Vec<TranscriptSegment>,
    #[serde(default)]
    pub expected: ExpectedMarkers,
}

/// Expectations recorded alongside a fixture.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpectedMarkers {
    /// Subtypes (snake_case) that must be present.
    #[serde(default)]
    pub subtypes: Vec<String>,
    /// Pairs of subtypes that must be linked as related.
    #[serde(default)]
    pub linked: Vec<[String; 2]>,
    /// Exact marker count, when the scenario pins one.
    #[serde(default)]
    pub marker_count: Option<usize>,
}

/// Load `test-fixtures/transcripts/<name>.json`.
pub fn load_transcript(name: &str) -> TranscriptFixture {
    load_fixture(&format!("transcripts/{name}.json"))
}

const SYNTHETIC_LINES: [(&str, &str); 8] = [
    ("A", "I want you to focus on this."),
    ("B", "Oh, I see what you mean."),
    ("A", "I think the plan is solid because it is simple."),
    ("B", "Exactly, I agree."),
    ("C", "So we all agree together on the plan."),
    ("A", "Do you remember when we practiced this, like we talked about?"),
    ("B", "Yes, as we know, we agreed to practice it every night."),
    ("C", "The weather was pleasant this afternoon."),
];

/// A deterministic transcript of `n` segments cycling through a fixed line
/// bank, each 5 seconds long with a 1 second gap.
pub fn synthetic_session(n: usize) -> Vec<TranscriptSegment> {
    (0..n)
        .map(|i| {
            let (speaker, text) = SYNTHETIC_LINES[i % SYNTHETIC_LINES.len()];
            let start = i as f64 * 6.0;
            TranscriptSegment::new(start, start + 5.0, Some(speaker), text)
        })
        .collect()
}
