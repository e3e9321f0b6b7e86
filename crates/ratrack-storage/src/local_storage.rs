//! Persistent key/value scope, the counterpart of browser local storage.

use std::sync::Arc;

use ratrack_core::errors::RatrackResult;
use ratrack_core::traits::KeyValueStore;

use crate::pool::SharedConnection;
use crate::queries::kv_ops;

/// `KeyValueStore` over the `key_value` table. Survives process restarts
/// when the engine is file-backed.
pub struct SqliteKeyValueStore {
    conn: Arc<SharedConnection>,
}

impl SqliteKeyValueStore {
    pub(crate) fn new(conn: Arc<SharedConnection>) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get_item(&self, key: &str) -> RatrackResult<Option<String>> {
        self.conn.with_conn(|conn| kv_ops::get_value(conn, key))
    }

    fn set_item(&self, key: &str, value: &str) -> RatrackResult<()> {
        self.conn.with_conn(|conn| kv_ops::set_value(conn, key, value))
    }

    fn remove_item(&self, key: &str) -> RatrackResult<()> {
        self.conn.with_conn(|conn| kv_ops::remove_value(conn, key))
    }
}
