use serde::{Deserialize, Serialize};

use crate::constants;

/// Which rule framework produced a marker. Opaque to the core; carried
/// through for downstream auditing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    pub source: String,
    pub method: String,
}

impl Provenance {
    pub fn new(source: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            method: method.into(),
        }
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::new(
            constants::DEFAULT_PROVENANCE_SOURCE,
            constants::DEFAULT_ANALYSIS_METHOD,
        )
    }
}
