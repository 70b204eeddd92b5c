//! Individual invariant checks. Each returns the findings it produced.

pub mod batch;
pub mod marker;
pub mod rapport;
