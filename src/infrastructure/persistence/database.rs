//! Connection pool bootstrap for the supported SQL backends.

use anyhow::{Context, Result};
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use super::{PgLinkRepository, SqliteLinkRepository};
use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

static PG_MIGRATOR: Migrator = sqlx::migrate!("./migrations/postgres");
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("./migrations/sqlite");

/// Storage backend selected from the `DATABASE_URL` scheme.
///
/// - `postgres://` / `postgresql://` - PostgreSQL
/// - `sqlite:` - SQLite file or `sqlite::memory:`
#[derive(Debug, Clone)]
pub enum Database {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl Database {
    /// Opens a connection pool using the pool settings from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL scheme is unsupported or the first
    /// connection cannot be established.
    pub async fn connect(config: &Config) -> Result<Self> {
        let url = config.database_url.as_str();

        if is_postgres_url(url) {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
                .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
                .test_before_acquire(true)
                .connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            return Ok(Self::Postgres(pool));
        }

        if is_sqlite_url(url) {
            let options = SqliteConnectOptions::from_str(url)
                .context("Invalid SQLite connection string")?
                .create_if_missing(true);

            // Every connection to `:memory:` opens a fresh database, so the pool
            // is pinned to one connection that is never recycled.
            let pool_options = if is_in_memory(url) {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
            } else {
                SqlitePoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .idle_timeout(Some(Duration::from_secs(config.db_idle_timeout)))
                    .max_lifetime(Some(Duration::from_secs(config.db_max_lifetime)))
            };

            let pool = pool_options
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .connect_with(options)
                .await
                .context("Failed to open SQLite database")?;

            return Ok(Self::Sqlite(pool));
        }

        anyhow::bail!("Unsupported database URL scheme")
    }

    /// Applies the embedded migrations for this backend.
    pub async fn migrate(&self) -> Result<()> {
        match self {
            Self::Postgres(pool) => PG_MIGRATOR.run(pool).await,
            Self::Sqlite(pool) => SQLITE_MIGRATOR.run(pool).await,
        }
        .context("Failed to apply migrations")
    }

    /// Builds the link repository for this backend.
    pub fn link_repository(&self) -> Arc<dyn LinkRepository> {
        match self {
            Self::Postgres(pool) => Arc::new(PgLinkRepository::new(Arc::new(pool.clone()))),
            Self::Sqlite(pool) => Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone()))),
        }
    }

    /// Runs a trivial query to verify connectivity.
    pub async fn ping(&self) -> Result<(), AppError> {
        match self {
            Self::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
            Self::Sqlite(pool) => sqlx::query("SELECT 1").execute(pool).await.map(|_| ()),
        }
        .map_err(AppError::from)
    }

    /// Short backend name for logs and health output.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Sqlite(_) => "sqlite",
        }
    }

    /// Closes every pooled connection.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

pub(crate) fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

pub(crate) fn is_sqlite_url(url: &str) -> bool {
    url.starts_with("sqlite:")
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
