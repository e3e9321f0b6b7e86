//! v001: documents.

use rusqlite::Connection;

use ratrack_core::errors::RatrackResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> RatrackResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            collection  TEXT NOT NULL,
            id          TEXT NOT NULL,
            data        TEXT NOT NULL,
            updated_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
            PRIMARY KEY (collection, id)
        );

        CREATE INDEX IF NOT EXISTS idx_documents_collection ON documents(collection);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
