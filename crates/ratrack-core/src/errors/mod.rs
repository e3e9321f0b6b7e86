//! Error handling for RA Track.
//! One error enum per subsystem, `thiserror` only, aggregated into [`RatrackError`].

pub mod config_error;
pub mod error_code;
pub mod scoring_error;
pub mod session_error;
pub mod store_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use error_code::ErrorCode;
pub use scoring_error::ScoringError;
pub use session_error::SessionError;
pub use store_error::StoreError;
pub use validation_error::ValidationError;

/// Top-level error type. Subsystem errors convert via `From`.
#[derive(Debug, thiserror::Error)]
pub enum RatrackError {
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ErrorCode for RatrackError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Session(e) => e.error_code(),
            Self::Store(e) => e.error_code(),
            Self::Scoring(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
        }
    }
}

/// Convenience alias used across the workspace.
pub type RatrackResult<T> = Result<T, RatrackError>;
