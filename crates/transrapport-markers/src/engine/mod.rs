//! Category engines: score every pattern of one category against a segment.

pub mod attention;
pub mod cluster;
pub mod memory;
pub mod semantic;

use transrapport_core::config::AnalysisConfig;
use transrapport_core::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CONTEXT_WINDOW, NEUTRAL_SPEAKER_SCORE,
};
use transrapport_core::errors::PatternError;
use transrapport_core::models::{stable_id, ConfidenceBreakdown, ContextWindow};
use transrapport_core::{MarkerCategory, MarkerEvent, MarkerSubtype, Provenance, TranscriptSegment};

use crate::context::SegmentContext;
use crate::lexicon::CueLexicon;
use crate::registry::{ContextRequirement, DetectionPattern, PatternRegistry};
use crate::relationships::RelationshipProcessor;
use crate::scoring::{self, ContextEvaluation};

pub use attention::AttentionHeuristics;
pub use cluster::ClusterHeuristics;
pub use memory::MemoryHeuristics;
pub use semantic::SemanticHeuristics;

/// Category-specific scoring and wording.
pub trait CategoryHeuristics: Send + Sync {
    fn category(&self) -> MarkerCategory;

    /// Base explanation for a subtype.
    fn describe(&self, subtype: MarkerSubtype) -> &'static str;

    /// Speaker-interaction sub-score in [0, 1]. Only called when the local
    /// speaker sequence has at least two entries.
    fn speaker_score(&self, subtype: MarkerSubtype, ctx: &SegmentContext<'_>) -> f64;

    /// Optional suffix appended to the explanation.
    fn annotate(&self, _subtype: MarkerSubtype, _ctx: &SegmentContext<'_>) -> Option<String> {
        None
    }
}

/// The heuristics for `category`.
pub fn heuristics_for(category: MarkerCategory) -> Box<dyn CategoryHeuristics> {
    match category {
        MarkerCategory::Attention => Box::new(AttentionHeuristics),
        MarkerCategory::Semantic => Box::new(SemanticHeuristics),
        MarkerCategory::Cluster => Box::new(ClusterHeuristics),
        MarkerCategory::Memory => Box::new(MemoryHeuristics),
    }
}

/// Engine settings derived from [`AnalysisConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub confidence_threshold: f64,
    pub provenance: Provenance,
    pub collect_context: bool,
    pub context_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            provenance: Provenance::default(),
            collect_context: true,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

impl From<&AnalysisConfig> for EngineConfig {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            provenance: config.provenance(),
            collect_context: config.collect_context,
            context_window: DEFAULT_CONTEXT_WINDOW,
        }
    }
}

/// A pattern that matched a segment, with its scores.
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'p> {
    pub pattern: &'p DetectionPattern,
    pub breakdown: ConfidenceBreakdown,
    pub context: ContextEvaluation,
}

impl ScoredCandidate<'_> {
    pub fn confidence(&self) -> f64 {
        self.breakdown.total()
    }
}

/// Detects markers of one category.
pub struct CategoryEngine {
    category: MarkerCategory,
    patterns: Vec<DetectionPattern>,
    heuristics: Box<dyn CategoryHeuristics>,
    cues: CueLexicon,
    config: EngineConfig,
    relationships: RelationshipProcessor,
}

impl std::fmt::Debug for CategoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryEngine")
            .field("category", &self.category)
            .field("patterns", &self.patterns.len())
            .field("config", &self.config)
            .finish()
    }
}

impl CategoryEngine {
    /// Engine over the registry's patterns for `category`.
    pub fn new(
        category: MarkerCategory,
        registry: &PatternRegistry,
        config: EngineConfig,
    ) -> Result<Self, PatternError> {
        Self::with_patterns(category, registry.load(category).to_vec(), config)
    }

    /// Engine over an explicit pattern list. Patterns of other categories
    /// are ignored.
    pub fn with_patterns(
        category: MarkerCategory,
        patterns: Vec<DetectionPattern>,
        config: EngineConfig,
    ) -> Result<Self, PatternError> {
        let patterns: Vec<_> = patterns.into_iter().filter(|p| p.category == category).collect();
        tracing::debug!(%category, pattern_count = patterns.len(), "category engine ready");
        Ok(Self {
            category,
            patterns,
            heuristics: heuristics_for(category),
            cues: CueLexicon::new()?,
            config,
            relationships: RelationshipProcessor::new(),
        })
    }

    pub fn category(&self) -> MarkerCategory {
        self.category
    }

    pub fn patterns(&self) -> &[DetectionPattern] {
        &self.patterns
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score one pattern against the context. `None` when the pattern has no
    /// lexical hit in the segment text.
    pub fn score<'p>(
        &self,
        pattern: &'p DetectionPattern,
        ctx: &SegmentContext<'_>,
    ) -> Option<ScoredCandidate<'p>> {
        let hits = pattern.match_text(&ctx.current.text);
        if !hits.is_candidate() {
            return None;
        }
        let context = scoring::contextual_score(&pattern.requirements, ctx, &self.cues);
        let speaker = if ctx.speaker_sequence.len() < 2 {
            NEUTRAL_SPEAKER_SCORE
        } else {
            self.heuristics
                .speaker_score(pattern.subtype, ctx)
                .clamp(0.0, 1.0)
        };
        let breakdown = ConfidenceBreakdown {
            lexical: scoring::lexical_score(&hits),
            contextual: context.score,
            temporal: scoring::temporal_score(ctx.current.duration()),
            speaker_interaction: speaker,
            base_weight: pattern.weight,
        };
        Some(ScoredCandidate {
            pattern,
            breakdown,
            context,
        })
    }

    /// Markers for the context's current segment, in pattern order.
    pub fn detect(&self, ctx: &SegmentContext<'_>) -> Vec<MarkerEvent> {
        if ctx.current.trimmed_text().is_empty() {
            return Vec::new();
        }
        self.patterns
            .iter()
            .filter_map(|pattern| self.score(pattern, ctx))
            .filter(|candidate| candidate.confidence() >= self.config.confidence_threshold)
            .filter_map(|candidate| self.build_marker(&candidate, ctx))
            .collect()
    }

    /// Markers for `segments[index]`.
    pub fn detect_at(&self, segments: &[TranscriptSegment], index: usize) -> Vec<MarkerEvent> {
        SegmentContext::build(segments, index, self.config.context_window)
            .map(|ctx| self.detect(&ctx))
            .unwrap_or_default()
    }

    /// Detect over every segment, then de-duplicate and link.
    pub fn analyze(&self, segments: &[TranscriptSegment]) -> Vec<MarkerEvent> {
        let raw: Vec<_> = (0..segments.len())
            .flat_map(|i| self.detect_at(segments, i))
            .collect();
        let markers = self.post_process(raw);
        tracing::info!(
            category = %self.category,
            segment_count = segments.len(),
            marker_count = markers.len(),
            "category analysis complete"
        );
        markers
    }

    pub fn post_process(&self, markers: Vec<MarkerEvent>) -> Vec<MarkerEvent> {
        self.relationships.process(markers)
    }

    fn build_marker(
        &self,
        candidate: &ScoredCandidate<'_>,
        ctx: &SegmentContext<'_>,
    ) -> Option<MarkerEvent> {
        let pattern = candidate.pattern;
        let segment = ctx.current;
        let start = format!("{:.3}", segment.start_time);
        let end = format!("{:.3}", segment.end_time);
        let index = ctx.index.to_string();
        let id = stable_id(
            "marker",
            &[self.category.as_str(), &pattern.id, &index, &start, &end],
        );

        let mut builder = MarkerEvent::builder(
            self.category,
            pattern.subtype,
            segment.start_time,
            segment.end_time,
        )
        .id(id)
        .confidence(candidate.confidence())
        .evidence(segment.trimmed_text())
        .explanation(self.explain(pattern.subtype, &candidate.context.satisfied, pattern, ctx))
        .speaker(segment.speaker.clone())
        .provenance(self.config.provenance.clone())
        .breakdown(candidate.breakdown)
        .pattern_id(pattern.id.clone());

        if self.config.collect_context {
            let (before_text, after_text) = ctx.neighbour_text();
            builder = builder.context_window(ContextWindow {
                before_text,
                after_text,
            });
        }

        match builder.build() {
            Ok(marker) => Some(marker),
            Err(err) => {
                tracing::warn!(
                    pattern_id = %pattern.id,
                    segment = ctx.index,
                    error = %err,
                    "skipping marker for malformed segment"
                );
                None
            }
        }
    }

    fn explain(
        &self,
        subtype: MarkerSubtype,
        satisfied: &[ContextRequirement],
        pattern: &DetectionPattern,
        ctx: &SegmentContext<'_>,
    ) -> String {
        let mut text = self.heuristics.describe(subtype).to_string();
        if let Some(note) = self.heuristics.annotate(subtype, ctx) {
            text.push(' ');
            text.push_str(&note);
        }
        let supporting: Vec<_> = satisfied
            .iter()
            .filter(|r| pattern.requirements.get(r).copied().unwrap_or(false))
            .map(|r| r.label())
            .collect();
        if !supporting.is_empty() {
            text.push_str(&format!("; supported by {}", supporting.join(", ")));
        }
        text
    }
}
