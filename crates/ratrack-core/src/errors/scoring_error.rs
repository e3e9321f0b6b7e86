use super::error_code::{self, ErrorCode};

/// Errors talking to the remote RA scoring endpoint.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("Backend returned HTML instead of JSON. Check server console. (HTTP {status})")]
    NonJsonResponse { status: u16 },

    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("malformed comparison result: {reason}")]
    MalformedResult { reason: String },

    #[error("all {attempts} attempts failed: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

impl ErrorCode for ScoringError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } | Self::RetriesExhausted { .. } => error_code::NETWORK_ERROR,
            Self::NonJsonResponse { .. } => error_code::NON_JSON_RESPONSE,
            Self::Rejected { .. } => error_code::SCORING_REJECTED,
            Self::MalformedResult { .. } => error_code::MALFORMED_RESULT,
        }
    }
}
