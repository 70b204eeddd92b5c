use serde::{Deserialize, Serialize};

/// One transcript segment, as supplied by the transcription collaborator.
/// Read-only to the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_time: f64,
    /// End time in seconds.
    pub end_time: f64,
    #[serde(default)]
    pub speaker: Option<String>,
    pub text: String,
    /// Transcription confidence, if the upstream recognizer supplied one.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl TranscriptSegment {
    pub fn new(start_time: f64, end_time: f64, speaker: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            start_time,
            end_time,
            speaker: speaker.map(str::to_string),
            text: text.into(),
            confidence: None,
        }
    }

    /// Segment duration in seconds (never negative).
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    /// Speaker label, `"unknown"` when diarization gave none.
    pub fn speaker_label(&self) -> &str {
        self.speaker.as_deref().unwrap_or("unknown")
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}
