//! Pipeline orchestrator.
//!
//! Engines run in the fixed category order Attention → Semantic → Cluster →
//! Memory. Detection is parallel (across categories and across segments);
//! post-processing, merging, and rapport calculation are sequential.

use std::collections::BTreeMap;
use std::time::Instant;

use rayon::prelude::*;

use transrapport_core::errors::PatternWarning;
use transrapport_core::traits::cancellation::{Cancellable, CancellationToken};
use transrapport_core::{
    AnalysisConfig, ConfigError, MarkerCategory, MarkerEvent, PipelineError, RapportIndicator,
    TranscriptSegment,
};
use transrapport_markers::{
    analyze_speaker_roles, CategoryEngine, EngineConfig, MarkerSequence, PatternRegistry,
    RelationshipProcessor, SpeakerRoles,
};
use transrapport_rapport::RapportCalculator;
use transrapport_validation::{MarkerValidator, ValidationReport, ValidatorConfig};

use crate::results::{AnalysisMetadata, AnalysisResults, EngineInfo};

/// Runs the enabled category engines and derives the rapport timeline.
///
/// Holds no mutable state; one instance may serve concurrent runs.
#[derive(Debug)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    engines: Vec<CategoryEngine>,
    relationships: RelationshipProcessor,
    rapport: Option<RapportCalculator>,
    warnings: Vec<PatternWarning>,
}

/// One category's post-processed output.
struct CategoryOutput {
    category: MarkerCategory,
    markers: Vec<MarkerEvent>,
}

impl AnalysisPipeline {
    /// Build from `config`, loading patterns from `config.patterns_dir` or
    /// the built-in registry.
    pub fn new(config: AnalysisConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        let registry = match &config.patterns_dir {
            Some(dir) => PatternRegistry::from_dir(dir)?,
            None => PatternRegistry::builtin()?,
        };
        Self::with_registry(config, registry)
    }

    /// Build over an explicit registry.
    pub fn with_registry(
        config: AnalysisConfig,
        registry: PatternRegistry,
    ) -> Result<Self, PipelineError> {
        config.validate()?;

        let engine_config = EngineConfig::from(&config);
        let mut engines = Vec::new();
        for category in config.enabled_categories() {
            if registry.load(category).is_empty() {
                return Err(ConfigError::EmptyPatternSet {
                    category: category.as_str().to_string(),
                }
                .into());
            }
            engines.push(CategoryEngine::new(category, &registry, engine_config.clone())?);
        }

        for warning in registry.warnings() {
            tracing::warn!(
                source = %warning.source_name,
                pattern_id = %warning.pattern_id,
                message = %warning.message,
                "pattern skipped at load"
            );
        }

        let rapport = config
            .enable_rapport
            .then(|| RapportCalculator::from_config(&config));

        tracing::info!(
            engines = engines.len(),
            patterns = registry.len(),
            rapport = rapport.is_some(),
            threshold = config.confidence_threshold,
            "analysis pipeline ready"
        );

        Ok(Self {
            config,
            engines,
            relationships: RelationshipProcessor::new(),
            rapport,
            warnings: registry.warnings().to_vec(),
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn pattern_warnings(&self) -> &[PatternWarning] {
        &self.warnings
    }

    /// Enabled engines in run order.
    pub fn engine_info(&self) -> Vec<EngineInfo> {
        self.engines
            .iter()
            .map(|e| EngineInfo {
                category: e.category(),
                code: e.category().code(),
                pattern_count: e.patterns().len(),
            })
            .collect()
    }

    pub fn run(&self, segments: &[TranscriptSegment]) -> Result<AnalysisResults, PipelineError> {
        self.execute(segments, None, None)
    }

    /// Run with a caller-supplied session duration for the rapport timeline.
    pub fn run_with_duration(
        &self,
        segments: &[TranscriptSegment],
        session_duration: Option<f64>,
    ) -> Result<AnalysisResults, PipelineError> {
        self.execute(segments, session_duration, None)
    }

    /// Run, polling `token` between engines. A cancelled run returns
    /// [`PipelineError::Cancelled`] and no partial result.
    pub fn run_cancellable(
        &self,
        segments: &[TranscriptSegment],
        token: &CancellationToken,
    ) -> Result<AnalysisResults, PipelineError> {
        self.execute(segments, None, Some(token))
    }

    /// Post-processed markers of the requested categories only. Categories
    /// that are not enabled map to an empty list.
    pub fn run_categories(
        &self,
        segments: &[TranscriptSegment],
        categories: &[MarkerCategory],
    ) -> BTreeMap<MarkerCategory, Vec<MarkerEvent>> {
        let mut out: BTreeMap<MarkerCategory, Vec<MarkerEvent>> =
            categories.iter().map(|c| (*c, Vec::new())).collect();
        let selected: Vec<&CategoryEngine> = self
            .engines
            .iter()
            .filter(|e| categories.contains(&e.category()))
            .collect();

        let outputs: Vec<CategoryOutput> = selected
            .par_iter()
            .map(|engine| detect_category(engine, segments))
            .collect();
        for output in outputs {
            out.insert(output.category, output.markers);
        }
        for category in categories {
            if !self.config.is_category_enabled(*category) {
                tracing::warn!(%category, "category not enabled in this pipeline");
            }
        }
        out
    }

    /// Validate markers against this pipeline's threshold and provenance.
    pub fn validate_markers(&self, markers: &[MarkerEvent], strict: bool) -> ValidationReport {
        MarkerValidator::new(ValidatorConfig::from_analysis(&self.config, strict))
            .validate_markers(markers)
    }

    /// Validate a full result bundle, rapport included.
    pub fn validate_results(&self, results: &AnalysisResults, strict: bool) -> ValidationReport {
        MarkerValidator::new(ValidatorConfig::from_analysis(&self.config, strict))
            .validate(&results.markers, &results.rapport)
    }

    fn execute(
        &self,
        segments: &[TranscriptSegment],
        session_duration: Option<f64>,
        token: Option<&CancellationToken>,
    ) -> Result<AnalysisResults, PipelineError> {
        let span = tracing::info_span!(
            "transrapport.pipeline",
            segment_count = segments.len(),
            engines = self.engines.len()
        );
        let _guard = span.enter();
        let started = Instant::now();

        if segments.is_empty() {
            tracing::info!("empty transcript, nothing to analyze");
            return Ok(AnalysisResults::empty(self.metadata(
                segments,
                &[],
                &[],
                0.0,
                started,
            )));
        }

        let cancelled = |t: Option<&CancellationToken>| t.is_some_and(|t| t.is_cancelled());

        let outputs: Option<Vec<CategoryOutput>> = self
            .engines
            .par_iter()
            .map(|engine| {
                if cancelled(token) {
                    return None;
                }
                Some(detect_category(engine, segments))
            })
            .collect();
        let outputs = match outputs {
            Some(outputs) if !cancelled(token) => outputs,
            _ => {
                tracing::warn!("pipeline run cancelled");
                return Err(PipelineError::Cancelled);
            }
        };

        let sequences: Vec<MarkerSequence> = outputs
            .iter()
            .flat_map(|o| self.relationships.identify_sequences(&o.markers))
            .collect();
        let markers = merge(outputs);
        let speaker_roles = analyze_speaker_roles(&markers);

        let duration = session_duration.unwrap_or_else(|| {
            markers.iter().map(|m| m.end_time).fold(0.0, f64::max)
        });
        let rapport = self.rapport_timeline(&markers, duration, &speaker_roles)?;

        let metadata = self.metadata(segments, &markers, &rapport, duration, started);
        tracing::info!(
            marker_count = metadata.marker_count,
            indicator_count = metadata.indicator_count,
            sequences = sequences.len(),
            processing_ms = started.elapsed().as_millis() as u64,
            "pipeline run complete"
        );

        Ok(AnalysisResults {
            markers,
            rapport,
            sequences,
            speaker_roles,
            metadata,
        })
    }

    fn rapport_timeline(
        &self,
        markers: &[MarkerEvent],
        duration: f64,
        roles: &SpeakerRoles,
    ) -> Result<Vec<RapportIndicator>, PipelineError> {
        let Some(calculator) = &self.rapport else {
            return Ok(Vec::new());
        };
        if markers.is_empty() {
            return Ok(Vec::new());
        }
        let context = roles.to_interaction_context();
        let indicators = if context.speaker_roles.is_empty() {
            calculator.calculate(markers, duration)?
        } else {
            calculator.calculate_with_context(markers, duration, &context)?
        };
        Ok(indicators)
    }

    fn metadata(
        &self,
        segments: &[TranscriptSegment],
        markers: &[MarkerEvent],
        rapport: &[RapportIndicator],
        session_duration: f64,
        started: Instant,
    ) -> AnalysisMetadata {
        let mut per_category_counts: BTreeMap<MarkerCategory, usize> = self
            .config
            .enabled_categories()
            .into_iter()
            .map(|c| (c, 0))
            .collect();
        for marker in markers {
            *per_category_counts.entry(marker.category).or_default() += 1;
        }

        AnalysisMetadata {
            segment_count: segments.len(),
            marker_count: markers.len(),
            per_category_counts,
            enabled_categories: self.config.enabled_categories(),
            confidence_threshold: self.config.confidence_threshold,
            indicator_count: rapport.len(),
            session_duration,
            processing_duration_secs: started.elapsed().as_secs_f64(),
            config: self.config.clone(),
            pattern_warnings: self.warnings.clone(),
        }
    }
}

/// Detect over every segment in parallel, then post-process sequentially.
fn detect_category(engine: &CategoryEngine, segments: &[TranscriptSegment]) -> CategoryOutput {
    let raw: Vec<MarkerEvent> = (0..segments.len())
        .into_par_iter()
        .flat_map_iter(|i| engine.detect_at(segments, i))
        .collect();
    let markers = engine.post_process(raw);
    tracing::debug!(
        category = %engine.category(),
        marker_count = markers.len(),
        "category detection complete"
    );
    CategoryOutput {
        category: engine.category(),
        markers,
    }
}

/// Concatenate in category run order, then stable-sort by start time.
fn merge(outputs: Vec<CategoryOutput>) -> Vec<MarkerEvent> {
    let mut merged: Vec<MarkerEvent> = outputs.into_iter().flat_map(|o| o.markers).collect();
    merged.sort_by(|a, b| a.start_time.total_cmp(&b.start_time));
    merged
}
