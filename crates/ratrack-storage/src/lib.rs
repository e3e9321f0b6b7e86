//! # ratrack-storage
//!
//! SQLite persistence: a collection-oriented document store standing in for
//! the remote one, and the persistent half of the session cache.

pub mod engine;
pub mod local_storage;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;
pub use local_storage::SqliteKeyValueStore;

use ratrack_core::errors::{RatrackError, StoreError};

/// Helper to convert a string error into a `RatrackError::Store`.
pub(crate) fn to_storage_err(message: String) -> RatrackError {
    StoreError::Sqlite { message }.into()
}
