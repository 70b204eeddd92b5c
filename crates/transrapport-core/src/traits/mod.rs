//! Cross-crate trait seams.

pub mod cancellation;

pub use cancellation::{Cancellable, CancellationToken};
