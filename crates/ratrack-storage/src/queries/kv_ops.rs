//! Key/value CRUD.

use rusqlite::{params, Connection, OptionalExtension};

use ratrack_core::errors::RatrackResult;

use crate::to_storage_err;

pub fn get_value(conn: &Connection, key: &str) -> RatrackResult<Option<String>> {
    conn.query_row(
        "SELECT value FROM key_value WHERE key = ?1",
        params![key],
        |row| row.get(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

pub fn set_value(conn: &Connection, key: &str, value: &str) -> RatrackResult<()> {
    conn.execute(
        "INSERT INTO key_value (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
        params![key, value],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn remove_value(conn: &Connection, key: &str) -> RatrackResult<()> {
    conn.execute("DELETE FROM key_value WHERE key = ?1", params![key])
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
