// SPDX-FileCopyrightText: 2026 Namecard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite state database: connection lifecycle and schema.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use namecard_core::NamecardError;
use tokio_rusqlite::Connection;

/// Schema for the client's local state. Each table holds at most one row:
/// the cached state is replaced wholesale, never merged.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS identity (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    profile TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS usage_cache (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    scans_used INTEGER NOT NULL DEFAULT 0,
    contacts_saved INTEGER NOT NULL DEFAULT 0,
    is_premium INTEGER NOT NULL DEFAULT 0,
    fetched_at TEXT
);
CREATE TABLE IF NOT EXISTS digital_card (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    card TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Convert any storage-layer error into `NamecardError::Storage`.
pub(crate) fn storage_err<E>(e: E) -> NamecardError
where
    E: std::error::Error + Send + Sync + 'static,
{
    NamecardError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the local state database.
///
/// Cheap to clone; all clones share the single background connection.
#[derive(Clone)]
pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    /// Open (or create) the state database at the given path and apply the
    /// schema. Parent directories are created as needed.
    pub async fn open(path: &str) -> Result<Self, NamecardError> {
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_err)?;
            }
        }

        let conn = Connection::open(path).await.map_err(storage_err)?;
        let db = Self { conn };
        db.apply_schema().await?;
        Ok(db)
    }

    /// Open an in-memory state database (tests).
    pub async fn open_in_memory() -> Result<Self, NamecardError> {
        let conn = Connection::open_in_memory().await.map_err(storage_err)?;
        let db = Self { conn };
        db.apply_schema().await?;
        Ok(db)
    }

    async fn apply_schema(&self) -> Result<(), NamecardError> {
        self.conn
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch(SCHEMA)?;
                Ok(())
            })
            .await
            .map_err(storage_err)
    }

    /// The underlying tokio-rusqlite connection.
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_applies_schema() {
        let db = StateDb::open_in_memory().await.unwrap();
        // All three tables exist and are queryable.
        let count = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                conn.query_row(
                    "SELECT count(*) FROM sqlite_master WHERE type = 'table' \
                     AND name IN ('identity', 'usage_cache', 'digital_card')",
                    [],
                    |row| row.get(0),
                )
            })
            .await
            .unwrap();
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state/namecard.db");
        let db = StateDb::open(path.to_str().unwrap()).await.unwrap();
        drop(db);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("namecard.db");
        let path = path.to_str().unwrap();
        StateDb::open(path).await.unwrap();
        // Second open against the same file re-applies the schema without error.
        StateDb::open(path).await.unwrap();
    }
}
