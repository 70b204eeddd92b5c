use std::fmt;

use serde::{Deserialize, Serialize};

/// The four marker families, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Attention,
    Semantic,
    Cluster,
    Memory,
}

impl MarkerCategory {
    pub const COUNT: usize = 4;

    /// All categories in the fixed run order: Attention → Semantic → Cluster → Memory.
    pub const ALL: [MarkerCategory; 4] = [
        Self::Attention,
        Self::Semantic,
        Self::Cluster,
        Self::Memory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attention => "attention",
            Self::Semantic => "semantic",
            Self::Cluster => "cluster",
            Self::Memory => "memory",
        }
    }

    /// Short framework code (ATO, SEM, CLU, MEMA).
    pub fn code(self) -> &'static str {
        match self {
            Self::Attention => "ATO",
            Self::Semantic => "SEM",
            Self::Cluster => "CLU",
            Self::Memory => "MEMA",
        }
    }

    /// Parse a category name or code, case-insensitively.
    pub fn parse_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "attention" | "ato" => Some(Self::Attention),
            "semantic" | "sem" => Some(Self::Semantic),
            "cluster" | "clu" => Some(Self::Cluster),
            "memory" | "mema" => Some(Self::Memory),
            _ => None,
        }
    }

    /// Position in the run order.
    pub fn run_index(self) -> usize {
        self as usize
    }

    /// Subtypes belonging to this category.
    pub fn subtypes(self) -> impl Iterator<Item = MarkerSubtype> {
        MarkerSubtype::ALL
            .into_iter()
            .filter(move |s| s.category() == self)
    }
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Finer-grained marker label. Each subtype belongs to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSubtype {
    // Attention (5)
    AttentionDirection,
    AttentionAcknowledgment,
    AttentionShift,
    AttentionMaintenance,
    AttentionFocus,
    // Semantic (5)
    SemanticAlignment,
    SemanticClarification,
    SemanticUnderstanding,
    SemanticExpansion,
    SemanticDivergence,
    // Cluster (5)
    ClusterFormation,
    ClusterRecognition,
    ClusterReinforcement,
    ClusterDissolution,
    ClusterTransition,
    // Memory (5)
    MemoryReference,
    MemoryAlignment,
    MemoryCorrection,
    MemoryExpansion,
    MemoryIntegration,
}

impl MarkerSubtype {
    pub const COUNT: usize = 20;

    pub const ALL: [MarkerSubtype; 20] = [
        Self::AttentionDirection,
        Self::AttentionAcknowledgment,
        Self::AttentionShift,
        Self::AttentionMaintenance,
        Self::AttentionFocus,
        Self::SemanticAlignment,
        Self::SemanticClarification,
        Self::SemanticUnderstanding,
        Self::SemanticExpansion,
        Self::SemanticDivergence,
        Self::ClusterFormation,
        Self::ClusterRecognition,
        Self::ClusterReinforcement,
        Self::ClusterDissolution,
        Self::ClusterTransition,
        Self::MemoryReference,
        Self::MemoryAlignment,
        Self::MemoryCorrection,
        Self::MemoryExpansion,
        Self::MemoryIntegration,
    ];

    pub fn category(self) -> MarkerCategory {
        use MarkerSubtype::*;
        match self {
            AttentionDirection | AttentionAcknowledgment | AttentionShift | AttentionMaintenance
            | AttentionFocus => MarkerCategory::Attention,
            SemanticAlignment | SemanticClarification | SemanticUnderstanding
            | SemanticExpansion | SemanticDivergence => MarkerCategory::Semantic,
            ClusterFormation | ClusterRecognition | ClusterReinforcement | ClusterDissolution
            | ClusterTransition => MarkerCategory::Cluster,
            MemoryReference | MemoryAlignment | MemoryCorrection | MemoryExpansion
            | MemoryIntegration => MarkerCategory::Memory,
        }
    }

    pub fn as_str(self) -> &'static str {
        use MarkerSubtype::*;
        match self {
            AttentionDirection => "attention_direction",
            AttentionAcknowledgment => "attention_acknowledgment",
            AttentionShift => "attention_shift",
            AttentionMaintenance => "attention_maintenance",
            AttentionFocus => "attention_focus",
            SemanticAlignment => "semantic_alignment",
            SemanticClarification => "semantic_clarification",
            SemanticUnderstanding => "semantic_understanding",
            SemanticExpansion => "semantic_expansion",
            SemanticDivergence => "semantic_divergence",
            ClusterFormation => "cluster_formation",
            ClusterRecognition => "cluster_recognition",
            ClusterReinforcement => "cluster_reinforcement",
            ClusterDissolution => "cluster_dissolution",
            ClusterTransition => "cluster_transition",
            MemoryReference => "memory_reference",
            MemoryAlignment => "memory_alignment",
            MemoryCorrection => "memory_correction",
            MemoryExpansion => "memory_expansion",
            MemoryIntegration => "memory_integration",
        }
    }

    pub fn parse_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str() == lower)
    }
}

impl fmt::Display for MarkerSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
