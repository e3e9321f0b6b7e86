//! Versioned schema migrations tracked in `PRAGMA user_version`.

mod v001_documents;
mod v002_key_value;

use rusqlite::Connection;

use ratrack_core::errors::{RatrackResult, StoreError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> RatrackResult<()>;

/// Ordered list of (version, migration).
const MIGRATIONS: [(u32, MigrationFn); 2] = [
    (1, v001_documents::migrate),
    (2, v002_key_value::migrate),
];

/// Latest schema version this build knows about.
pub const LATEST_VERSION: u32 = 2;

/// Current schema version of a connection.
pub fn current_version(conn: &Connection) -> RatrackResult<u32> {
    conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Apply every migration newer than the stored version, each in its own
/// transaction. Returns the number applied.
pub fn run_migrations(conn: &Connection) -> RatrackResult<usize> {
    let current = current_version(conn)?;
    let mut applied = 0;

    for (version, migrate) in MIGRATIONS.iter() {
        if *version <= current {
            continue;
        }
        let fail = |reason: String| StoreError::MigrationFailed {
            version: *version,
            reason,
        };

        conn.execute_batch("BEGIN")
            .map_err(|e| fail(e.to_string()))?;
        let result = migrate(conn).and_then(|_| {
            conn.pragma_update(None, "user_version", *version)
                .map_err(|e| fail(e.to_string()).into())
        });
        match result {
            Ok(()) => {
                conn.execute_batch("COMMIT")
                    .map_err(|e| fail(e.to_string()))?;
                tracing::debug!(version, "storage: applied migration");
                applied += 1;
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(fail(e.to_string()).into());
            }
        }
    }
    Ok(applied)
}
