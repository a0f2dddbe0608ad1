use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use shortly_core::error::Result;
use shortly_core::repository::{ensure_non_empty, Repository, UrlRecord};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};
use typed_builder::TypedBuilder;

use crate::error::translate;

const SCHEMA: &str = include_str!("../ddl/sqlite/url.sql");

/// Settings for opening a [`SqliteRepository`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct SqliteConfig {
    #[builder(setter(into))]
    path: PathBuf,
    #[builder(default = 8)]
    max_connections: u32,
    /// How long a writer waits on a locked database before giving up.
    #[builder(default = Duration::from_secs(5))]
    busy_timeout: Duration,
}

/// SQLite implementation of the repository contract.
///
/// Alias uniqueness is enforced by the `UNIQUE` constraint on
/// `url.alias`; inserts never check for an existing alias first, so
/// concurrent writers are serialised by SQLite and exactly one of them
/// wins.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Wraps an existing pool. The schema is assumed to be in place.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens (or creates) the database file at `path` and ensures the
    /// schema exists.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(SqliteConfig::builder().path(path.as_ref()).build()).await
    }

    pub async fn open_with(config: SqliteConfig) -> Result<Self> {
        const OP: &str = "storage.sqlite.open";

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(config.busy_timeout);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|err| translate(OP, err))?;

        let repository = Self::new(pool);
        repository.init_schema().await?;

        info!(path = %config.path.display(), "sqlite storage ready");
        Ok(repository)
    }

    /// Opens a private in-memory database.
    ///
    /// The pool is pinned to a single connection that never expires,
    /// since every SQLite in-memory connection is its own database.
    pub async fn in_memory() -> Result<Self> {
        const OP: &str = "storage.sqlite.in_memory";

        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(|err| translate(OP, err))?;

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|err| translate(OP, err))?;

        let repository = Self::new(pool);
        repository.init_schema().await?;
        Ok(repository)
    }

    /// Creates the `url` table and its alias index if they are missing.
    ///
    /// Safe to call any number of times; existing rows are untouched.
    pub async fn init_schema(&self) -> Result<()> {
        const OP: &str = "storage.sqlite.init_schema";

        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|err| translate(OP, err))?;

        Ok(())
    }

    /// Returns the full record stored under `alias`.
    pub async fn get_record(&self, alias: &str) -> Result<UrlRecord> {
        const OP: &str = "storage.sqlite.get_record";

        let row = sqlx::query("SELECT id, alias, url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| translate(OP, err))?;

        Ok(UrlRecord {
            id: row.try_get("id").map_err(|err| translate(OP, err))?,
            alias: row.try_get("alias").map_err(|err| translate(OP, err))?,
            url: row.try_get("url").map_err(|err| translate(OP, err))?,
        })
    }

    /// Returns the number of stored records.
    pub async fn count(&self) -> Result<i64> {
        const OP: &str = "storage.sqlite.count";

        sqlx::query_scalar("SELECT COUNT(*) FROM url")
            .fetch_one(&self.pool)
            .await
            .map_err(|err| translate(OP, err))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for in-flight statements and closes every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64> {
        const OP: &str = "storage.sqlite.save_url";

        ensure_non_empty(url, alias)?;

        let result = sqlx::query("INSERT INTO url(url, alias) VALUES(?, ?)")
            .bind(url)
            .bind(alias)
            .execute(&self.pool)
            .await
            .map_err(|err| translate(OP, err))?;

        let id = result.last_insert_rowid();
        debug!(alias, id, "saved url");
        Ok(id)
    }

    async fn get_url(&self, alias: &str) -> Result<String> {
        const OP: &str = "storage.sqlite.get_url";

        sqlx::query_scalar("SELECT url FROM url WHERE alias = ?")
            .bind(alias)
            .fetch_one(&self.pool)
            .await
            .map_err(|err| translate(OP, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortly_core::StorageError;

    #[tokio::test]
    async fn scenario() {
        let repo = SqliteRepository::in_memory().await.unwrap();

        let id = repo.save_url("https://example.com/a", "ex1").await.unwrap();
        assert_eq!(id, 1);
        assert_eq!(repo.get_url("ex1").await.unwrap(), "https://example.com/a");

        let err = repo
            .save_url("https://example.com/b", "ex1")
            .await
            .unwrap_err();
        assert_eq!(err, StorageError::AlreadyExists);

        let err = repo.get_url("missing").await.unwrap_err();
        assert_eq!(err, StorageError::NotFound);
    }

    #[tokio::test]
    async fn empty_input_never_reaches_the_table() {
        let repo = SqliteRepository::in_memory().await.unwrap();

        assert!(matches!(
            repo.save_url("", "abc").await,
            Err(StorageError::InvalidInput(_))
        ));
        assert!(matches!(
            repo.save_url("https://example.com", "").await,
            Err(StorageError::InvalidInput(_))
        ));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn get_record_returns_all_columns() {
        let repo = SqliteRepository::in_memory().await.unwrap();
        let id = repo.save_url("https://example.com", "rec").await.unwrap();

        let record = repo.get_record("rec").await.unwrap();
        assert_eq!(
            record,
            UrlRecord {
                id,
                alias: "rec".to_string(),
                url: "https://example.com".to_string(),
            }
        );
        assert_eq!(
            repo.get_record("nope").await.unwrap_err(),
            StorageError::NotFound
        );
    }
}
