//! Stable error codes for surfaces that report errors to users or scripts.

/// Every error enum implements this to expose a structured code string.
pub trait ErrorCode {
    /// Returns the code string (e.g., "SCORING_REJECTED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SESSION_ERROR: &str = "SESSION_ERROR";
pub const NOT_SIGNED_IN: &str = "NOT_SIGNED_IN";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const INVALID_DOCUMENT: &str = "INVALID_DOCUMENT";
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
pub const NON_JSON_RESPONSE: &str = "NON_JSON_RESPONSE";
pub const SCORING_REJECTED: &str = "SCORING_REJECTED";
pub const MALFORMED_RESULT: &str = "MALFORMED_RESULT";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
