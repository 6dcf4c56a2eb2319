//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// Every call acquires its own connection and runs a single statement, so no
/// transaction spans two operations.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Counts all stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;

    /// Lists links in creation order.
    ///
    /// `offset` and `limit` are independent; omitting both returns every link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: Option<i64>, limit: Option<i64>) -> Result<Vec<Link>, AppError>;

    /// Finds a link by its id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Finds a link by its short name.
    async fn get_by_short_name(&self, short_name: &str) -> Result<Option<Link>, AppError>;

    /// Inserts a new link, stamping `created_at` with the current UTC time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short name is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Overwrites `original_url` and `short_name` of an existing link.
    ///
    /// Returns `Ok(None)` if no link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the new short name belongs to another link.
    async fn update(&self, id: i64, changes: LinkChanges) -> Result<Option<Link>, AppError>;

    /// Removes a link permanently.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if none matched.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
