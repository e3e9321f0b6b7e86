//! StorageEngine: owns the connection, runs migrations, implements DocumentStore.

use std::path::Path;
use std::sync::Arc;

use ratrack_core::config::StorageConfig;
use ratrack_core::errors::RatrackResult;
use ratrack_core::models::{Document, DocumentQuery};
use ratrack_core::traits::DocumentStore;

use crate::local_storage::SqliteKeyValueStore;
use crate::migrations;
use crate::pool::SharedConnection;
use crate::queries::document_ops;

/// The main storage engine.
pub struct StorageEngine {
    conn: Arc<SharedConnection>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path, config: &StorageConfig) -> RatrackResult<Self> {
        let conn = SharedConnection::open(path, config.busy_timeout_ms)?;
        let engine = Self {
            conn: Arc::new(conn),
        };
        engine.initialize()?;
        tracing::debug!(path = %path.display(), "storage: opened");
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> RatrackResult<Self> {
        let engine = Self {
            conn: Arc::new(SharedConnection::open_in_memory()?),
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> RatrackResult<()> {
        let applied = self.conn.with_conn(migrations::run_migrations)?;
        if applied > 0 {
            tracing::info!(applied, "storage: schema migrated");
        }
        Ok(())
    }

    /// Persistent key/value store sharing this engine's database.
    pub fn key_value_store(&self) -> SqliteKeyValueStore {
        SqliteKeyValueStore::new(Arc::clone(&self.conn))
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> RatrackResult<usize> {
        self.conn
            .with_conn(|conn| document_ops::count_documents(conn, collection))
    }

    /// Current schema version.
    pub fn schema_version(&self) -> RatrackResult<u32> {
        self.conn.with_conn(migrations::current_version)
    }
}

impl DocumentStore for StorageEngine {
    fn get(&self, collection: &str, id: &str) -> RatrackResult<Option<Document>> {
        self.conn
            .with_conn(|conn| document_ops::get_document(conn, collection, id))
    }

    fn query(&self, query: &DocumentQuery) -> RatrackResult<Vec<Document>> {
        self.conn
            .with_conn(|conn| document_ops::query_documents(conn, query))
    }

    fn put(&self, collection: &str, id: &str, data: &serde_json::Value) -> RatrackResult<()> {
        self.conn
            .with_conn(|conn| document_ops::put_document(conn, collection, id, data))
    }

    fn delete(&self, collection: &str, id: &str) -> RatrackResult<()> {
        self.conn
            .with_conn(|conn| document_ops::delete_document(conn, collection, id))
    }
}
