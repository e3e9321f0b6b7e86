//! Single shared connection behind a mutex. Writes are serialized.

pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;

use ratrack_core::errors::RatrackResult;

use crate::to_storage_err;

/// A single connection protected by a mutex.
pub struct SharedConnection {
    conn: Mutex<Connection>,
}

impl SharedConnection {
    /// Open a connection to the given database path.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> RatrackResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, busy_timeout_ms)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing and throwaway sessions).
    pub fn open_in_memory() -> RatrackResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        pragmas::apply_pragmas(&conn, 0)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the lock and run a closure with the connection.
    pub fn with_conn<F, T>(&self, f: F) -> RatrackResult<T>
    where
        F: FnOnce(&Connection) -> RatrackResult<T>,
    {
        let guard = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        f(&guard)
    }
}
