// SPDX-FileCopyrightText: 2026 Triagent Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;

use tracing::debug;
use triagent_core::TriagentError;

/// Convert a tokio-rusqlite error into TriagentError::Storage.
pub(crate) fn map_tr_err(e: tokio_rusqlite::Error<rusqlite::Error>) -> TriagentError {
    TriagentError::Storage {
        source: Box::new(e),
    }
}

/// Handle to the ticket database: a single tokio-rusqlite connection.
///
/// tokio-rusqlite serializes all closure calls on one background thread,
/// which eliminates SQLITE_BUSY errors under concurrent in-process access.
pub struct Database {
    conn: tokio_rusqlite::Connection,
}

impl Database {
    /// Open or create the ticket database at `path`.
    ///
    /// Creates parent directories as needed, runs embedded migrations on
    /// a blocking connection, then opens the async connection and applies
    /// PRAGMAs (WAL journal mode, busy timeout).
    pub async fn open(path: &Path) -> Result<Self, TriagentError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| TriagentError::Storage {
                source: Box::new(e),
            })?;
        }

        // Migrations run to completion before any async caller can touch
        // the schema.
        let migrate_path = path.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<(), TriagentError> {
            let mut conn =
                rusqlite::Connection::open(&migrate_path).map_err(|e| TriagentError::Storage {
                    source: Box::new(e),
                })?;
            crate::migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| TriagentError::Internal(format!("migration task panicked: {e}")))??;

        let conn = tokio_rusqlite::Connection::open(path)
            .await
            .map_err(|e| TriagentError::Storage {
                source: Box::new(e),
            })?;

        conn.call(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;",
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        debug!(path = %path.display(), "ticket database opened");
        Ok(Self { conn })
    }

    /// Returns the underlying tokio-rusqlite connection.
    pub fn connection(&self) -> &tokio_rusqlite::Connection {
        &self.conn
    }

    /// Checkpoint the WAL into the main database file.
    pub async fn checkpoint(&self) -> Result<(), TriagentError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tickets.db");
        let db = Database::open(&path).await.unwrap();
        assert!(path.exists(), "database file should be created");

        let count: i64 = db
            .connection()
            .call(|conn| -> Result<i64, rusqlite::Error> {
                let n = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE name = 'tickets'",
                    [],
                    |row| row.get(0),
                )?;
                Ok(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/tickets.db");
        Database::open(&path).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn open_fails_when_path_is_a_directory() {
        let dir = tempdir().unwrap();
        let result = Database::open(dir.path()).await;
        assert!(result.is_err(), "opening a directory should fail");
    }

    #[tokio::test]
    async fn checkpoint_succeeds_on_fresh_database() {
        let dir = tempdir().unwrap();
        let db = Database::open(&dir.path().join("tickets.db")).await.unwrap();
        db.checkpoint().await.unwrap();
    }
}
