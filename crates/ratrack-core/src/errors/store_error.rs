use super::error_code::{self, ErrorCode};

/// Document store and key/value store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("SQLite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("query on collection {collection} failed: {reason}")]
    QueryFailed { collection: String, reason: String },

    #[error("document {collection}/{id} is invalid: {reason}")]
    InvalidDocument {
        collection: String,
        id: String,
        reason: String,
    },
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sqlite { .. } | Self::QueryFailed { .. } => error_code::STORAGE_ERROR,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            Self::InvalidDocument { .. } => error_code::INVALID_DOCUMENT,
        }
    }
}
