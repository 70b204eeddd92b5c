//! Shared constants for the TransRapport analysis engine.

/// TransRapport version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default minimum confidence for a marker to be emitted.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Default rapport calculation window in seconds.
pub const DEFAULT_WINDOW_SECONDS: f64 = 60.0;

/// Default exponential smoothing factor for the rapport timeline.
pub const DEFAULT_SMOOTHING_FACTOR: f64 = 0.3;

/// Default provenance source tag carried on every marker.
pub const DEFAULT_PROVENANCE_SOURCE: &str = "LD-3.4-constitution";

/// Default analysis method tag carried on every marker.
pub const DEFAULT_ANALYSIS_METHOD: &str = "LD-3.4";

/// Number of neighbouring segments on each side of the current one.
pub const DEFAULT_CONTEXT_WINDOW: usize = 2;

// ---- Scoring ----

/// Sub-score weights: lexical, contextual, temporal, speaker interaction.
pub const LEXICAL_WEIGHT: f64 = 0.4;
pub const CONTEXTUAL_WEIGHT: f64 = 0.3;
pub const TEMPORAL_WEIGHT: f64 = 0.2;
pub const SPEAKER_WEIGHT: f64 = 0.1;

/// Share of the lexical score taken by keyword coverage (rest is regex coverage).
pub const KEYWORD_SHARE: f64 = 0.55;

/// Distinct hits at which keyword / regex coverage saturates.
pub const LEXICAL_SATURATION: usize = 2;

/// Contextual score for patterns that declare no requirements.
pub const NEUTRAL_CONTEXT_SCORE: f64 = 0.65;

/// Speaker score when the local speaker sequence is too short to judge.
pub const NEUTRAL_SPEAKER_SCORE: f64 = 0.5;

/// Plausible marker utterance duration, seconds (inclusive).
pub const MIN_MARKER_DURATION: f64 = 1.0;
pub const MAX_MARKER_DURATION: f64 = 15.0;

/// Temporal scores inside / outside the plausible duration range.
pub const TEMPORAL_IN_RANGE: f64 = 1.0;
pub const TEMPORAL_OUT_OF_RANGE: f64 = 0.5;

/// Default base weight for patterns that omit one.
pub const DEFAULT_PATTERN_WEIGHT: f64 = 0.8;

// ---- Rapport ----

/// Smallest accepted rapport window, seconds.
pub const MIN_WINDOW_SECONDS: f64 = 1.0;

/// Upper bound on the spacing between rapport samples, seconds.
pub const MAX_SAMPLE_INTERVAL: f64 = 30.0;

/// Variance of recent deltas above which the trend is volatile.
pub const TREND_VOLATILITY_THRESHOLD: f64 = 0.1;

/// Mean delta magnitude above which the trend is increasing / decreasing.
pub const TREND_DELTA_THRESHOLD: f64 = 0.05;

/// Prior smoothed values considered when classifying a trend.
pub const TREND_HISTORY: usize = 3;

/// Indicator-to-indicator change counted as a key moment.
pub const KEY_MOMENT_THRESHOLD: f64 = 0.2;

/// Maximum key moments reported by a session summary.
pub const MAX_KEY_MOMENTS: usize = 5;

/// Least-squares slope above which a session is improving / declining.
pub const SESSION_SLOPE_THRESHOLD: f64 = 0.02;

/// Marker count at which the rapport quantity factor saturates.
pub const RAPPORT_MARKER_CAP: usize = 5;
