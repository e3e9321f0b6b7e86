use super::error_code::{self, ErrorCode};

/// Session and identity errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("signed-in user has no uid")]
    MissingUid,

    #[error("cached user in {scope} storage is malformed: {reason}")]
    MalformedUser { scope: String, reason: String },
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotSignedIn | Self::MissingUid => error_code::NOT_SIGNED_IN,
            Self::MalformedUser { .. } => error_code::SESSION_ERROR,
        }
    }
}
