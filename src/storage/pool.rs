//! SQLite connection pool for the request store.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::SqlitePool;

/// Manages a single SQLite pool; creates the database file if missing.
#[derive(Clone)]
pub struct StorePool {
    pool: SqlitePool,
}

impl StorePool {
    /// Open a pool for the given database file path.
    pub async fn connect(database_path: &str) -> Result<Self, sqlx::Error> {
        tracing::info!(path = %database_path, "Opening request store");

        // WAL lets concurrent calls insert without tripping over the writer lock.
        let options = SqliteConnectOptions::new()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .filename(database_path);

        let pool = SqlitePool::connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
