//! # transrapport-validation
//!
//! Checks marker and rapport batches against their invariants. Findings are
//! collected into a [`ValidationReport`]; nothing is mutated or dropped.

pub mod checks;
pub mod engine;
pub mod report;

pub use engine::{MarkerValidator, ValidatorConfig};
pub use report::ValidationReport;
