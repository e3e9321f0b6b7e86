use super::error_code::{self, ErrorCode};

/// Form and input validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Please ensure all fields are filled.")]
    IncompleteForm,

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: String, value: String },

    #[error("{field} is required")]
    MissingField { field: String },

    #[error("a comparison is already being analysed")]
    SubmitInProgress,
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
