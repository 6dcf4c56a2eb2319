//! SQL repository implementations.
//!
//! Both backends use SQLx runtime-checked queries and share the [`LinkRow`]
//! mapping.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL link storage
//! - [`SqliteLinkRepository`] - SQLite link storage (local runs and tests)
//!
//! [`Database`] picks the backend from the connection URL and applies the
//! embedded migrations.

pub mod database;
pub mod pg_link_repository;
pub mod sqlite_link_repository;

pub use database::Database;
pub use pg_link_repository::PgLinkRepository;
pub use sqlite_link_repository::SqliteLinkRepository;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::Link;
use crate::error::AppError;
use crate::utils::db_error::is_short_name_violation;

/// Column set selected by every link query.
pub(crate) const LINK_COLUMNS: &str = "id, original_url, short_name, created_at";

/// Raw `links` row as returned by either backend.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.original_url, row.short_name, row.created_at)
    }
}

/// Maps an insert/update failure, naming the short name on uniqueness conflicts.
pub(crate) fn map_write_error(e: sqlx::Error, short_name: &str) -> AppError {
    if is_short_name_violation(&e) {
        return AppError::conflict(
            "Short name already exists",
            json!({ "short_name": short_name }),
        );
    }

    AppError::from(e)
}
