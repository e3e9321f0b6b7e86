//! v002: key_value (persistent session scope).

use rusqlite::Connection;

use ratrack_core::errors::RatrackResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RatrackResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS key_value (
            key         TEXT PRIMARY KEY,
            value       TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
