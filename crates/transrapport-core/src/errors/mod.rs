//! Error handling for TransRapport.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod model_error;
pub mod pattern_error;
pub mod pipeline_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::TransrapportErrorCode;
pub use model_error::ModelError;
pub use pattern_error::{PatternError, PatternWarning};
pub use pipeline_error::PipelineError;
pub use validation_error::ValidationError;
