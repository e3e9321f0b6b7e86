//! PRAGMA configuration applied to every SQLite connection.

use rusqlite::Connection;

use ratrack_core::errors::RatrackResult;

use crate::to_storage_err;

/// Apply journal, sync, and busy-timeout pragmas.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> RatrackResult<()> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = {busy_timeout_ms};
        PRAGMA foreign_keys = ON;
        "
    ))
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
