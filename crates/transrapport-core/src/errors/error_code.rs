//! TransrapportErrorCode trait for the caller boundary.

/// Structured error code for callers (CLI, storage, export layers).
/// Every error enum implements this so callers can branch on a stable
/// string instead of parsing messages.
pub trait TransrapportErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PATTERN_ERROR: &str = "PATTERN_ERROR";
pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const CANCELLED: &str = "CANCELLED";
