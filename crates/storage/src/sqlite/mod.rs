use std::sync::Arc;
use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;

use crate::repository::{FlashcardRepository, Storage};

mod flashcard_repo;
mod mapping;
mod migrate;

const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run on every new connection before it joins the pool.
const CONNECTION_PRAGMAS: [&str; 3] = [
    "PRAGMA foreign_keys = ON;",
    "PRAGMA journal_mode = WAL;",
    "PRAGMA busy_timeout = 5000;",
];

/// Flashcard store backed by a `SQLite` pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open a pool on `database_url`. The schema is not touched; call
    /// [`SqliteRepository::migrate`] or use [`Storage::sqlite`].
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when the database cannot be opened or a
    /// connection pragma is rejected.
    pub async fn connect(database_url: &str) -> Result<Self, SqliteInitError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;
        tracing::debug!(database_url, "sqlite pool connected");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Bring the flashcard schema up to the latest version.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration step fails; the failed step
    /// is rolled back.
    pub async fn migrate(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Connect, migrate and wrap the flashcard store.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` from either the connection or the migration.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::connect(database_url).await?;
        repo.migrate().await?;
        let flashcards: Arc<dyn FlashcardRepository> = Arc::new(repo);
        Ok(Self { flashcards })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn connections_enforce_foreign_keys() {
        let repo = SqliteRepository::connect("sqlite::memory:").await.unwrap();
        let row = sqlx::query("PRAGMA foreign_keys;")
            .fetch_one(repo.pool())
            .await
            .unwrap();
        let enabled: i64 = row.get(0);
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn migrate_creates_the_flashcards_table() {
        let repo = SqliteRepository::connect("sqlite:file:memdb_sqlite_mod?mode=memory&cache=shared")
            .await
            .unwrap();
        repo.migrate().await.unwrap();

        let row = sqlx::query(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'flashcards'",
        )
        .fetch_one(repo.pool())
        .await
        .unwrap();
        let tables: i64 = row.get(0);
        assert_eq!(tables, 1);
    }
}
