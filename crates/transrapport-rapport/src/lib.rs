//! # transrapport-rapport
//!
//! Derives a bounded rapport timeline from detected markers: windowed
//! weighted sampling, exponential smoothing, trend classification, and a
//! session-level summary.

pub mod calculator;
pub mod summary;
pub mod trend;
pub mod weights;
pub mod window;

pub use calculator::{RapportCalculator, RawSample};
pub use summary::{summarize, KeyMoment, MomentKind, SessionDirection, SessionSummary};
pub use trend::{classify_trend, smooth_series};
pub use weights::CategoryWeights;
