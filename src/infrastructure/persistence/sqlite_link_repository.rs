//! SQLite implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{LINK_COLUMNS, LinkRow, map_write_error};
use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// SQLite repository for link storage and retrieval.
///
/// SQLite needs a `LIMIT` clause whenever `OFFSET` is present; `LIMIT -1`
/// means unbounded.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn list(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links ORDER BY id LIMIT ? OFFSET ?"
        ))
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn get_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            "SELECT {LINK_COLUMNS} FROM links WHERE short_name = ?"
        ))
        .bind(short_name)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            INSERT INTO links (original_url, short_name, created_at)
            VALUES (?, ?, ?)
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&new_link.original_url)
        .bind(&new_link.short_name)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, &new_link.short_name))?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, changes: LinkChanges) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(&format!(
            r#"
            UPDATE links
            SET original_url = ?, short_name = ?
            WHERE id = ?
            RETURNING {LINK_COLUMNS}
            "#
        ))
        .bind(&changes.original_url)
        .bind(&changes.short_name)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_write_error(e, &changes.short_name))?;

        Ok(row.map(Link::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM links WHERE id = ?")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
