use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::stable_id;
use crate::errors::ModelError;

/// Direction of rapport change at a sample point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RapportTrend {
    Increasing,
    Decreasing,
    Stable,
    Volatile,
}

impl RapportTrend {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
            Self::Volatile => "volatile",
        }
    }
}

impl fmt::Display for RapportTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RapportTrend {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increasing" => Ok(Self::Increasing),
            "decreasing" => Ok(Self::Decreasing),
            "stable" => Ok(Self::Stable),
            "volatile" => Ok(Self::Volatile),
            other => Err(ModelError::UnknownTrend {
                value: other.to_string(),
            }),
        }
    }
}

/// Qualitative band for a rapport value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RapportLevel {
    VeryLow,
    Low,
    Neutral,
    Moderate,
    High,
    VeryHigh,
}

impl RapportLevel {
    pub fn from_value(value: f64) -> Self {
        if value >= 0.8 {
            Self::VeryHigh
        } else if value >= 0.6 {
            Self::High
        } else if value >= 0.2 {
            Self::Moderate
        } else if value >= -0.2 {
            Self::Neutral
        } else if value >= -0.6 {
            Self::Low
        } else {
            Self::VeryLow
        }
    }
}

/// Optional interaction annotations carried on an indicator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionContext {
    /// Speaker label to role name (e.g. "director", "responder").
    #[serde(default)]
    pub speaker_roles: BTreeMap<String, String>,
    #[serde(default)]
    pub session_phase: Option<String>,
}

/// Rapport at one sample point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RapportIndicator {
    pub id: String,
    pub timestamp: f64,
    /// Smoothed rapport value in [-1, 1].
    pub value: f64,
    pub trend: RapportTrend,
    pub confidence: f64,
    pub contributing_markers: Vec<String>,
    /// Signed weight each contributing marker carried in this sample.
    #[serde(default)]
    pub marker_contributions: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub interaction_context: Option<InteractionContext>,
    pub calculation_window: f64,
}

impl RapportIndicator {
    pub fn new(
        timestamp: f64,
        value: f64,
        trend: RapportTrend,
        confidence: f64,
        contributing_markers: Vec<String>,
        calculation_window: f64,
    ) -> Result<Self, ModelError> {
        if !timestamp.is_finite() || timestamp < 0.0 {
            return Err(ModelError::NegativeTime { value: timestamp });
        }
        if !(-1.0..=1.0).contains(&value) {
            return Err(ModelError::RapportValueOutOfRange { value });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(ModelError::ConfidenceOutOfRange { value: confidence });
        }
        let ts = format!("{timestamp:.3}");
        let window = format!("{calculation_window:.3}");
        Ok(Self {
            id: stable_id("rapport", &[&ts, &window]),
            timestamp,
            value,
            trend,
            confidence,
            contributing_markers,
            marker_contributions: None,
            interaction_context: None,
            calculation_window,
        })
    }

    pub fn with_contributions(mut self, contributions: BTreeMap<String, f64>) -> Self {
        self.marker_contributions = Some(contributions);
        self
    }

    pub fn with_context(mut self, context: InteractionContext) -> Self {
        self.interaction_context = Some(context);
        self
    }

    pub fn level(&self) -> RapportLevel {
        RapportLevel::from_value(self.value)
    }
}
