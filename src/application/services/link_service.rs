//! Link management service.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkChanges, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use serde_json::json;

/// Error message for a missing link id.
pub const LINK_NOT_FOUND: &str = "Link not found";

/// Error message for a short name held by another link.
pub const SHORT_NAME_EXISTS: &str = "Short name already exists";

/// Service for creating, reading, updating and deleting links.
///
/// Short name uniqueness is checked before each write so the common case
/// fails without touching the table, but the storage constraint is what
/// actually decides a race: a conflict reported on write is mapped to the
/// same error as a failed pre-check.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>) -> Self {
        Self { link_repository }
    }

    /// Total number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    /// Lists links in creation order. See [`LinkRepository::list`].
    pub async fn list(
        &self,
        offset: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Vec<Link>, AppError> {
        self.link_repository.list(offset, limit).await
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Creates a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short name is taken, whether that
    /// is seen by the pre-check or by the storage constraint.
    pub async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        if self
            .link_repository
            .get_by_short_name(&new_link.short_name)
            .await?
            .is_some()
        {
            tracing::warn!(short_name = %new_link.short_name, "Short name already taken");
            return Err(short_name_exists(&new_link.short_name));
        }

        let short_name = new_link.short_name.clone();

        match self.link_repository.create(new_link).await {
            Ok(link) => {
                tracing::info!(id = link.id, short_name = %link.short_name, "Link created");
                Ok(link)
            }
            Err(AppError::Conflict { .. }) => {
                tracing::warn!(%short_name, "Short name taken by a concurrent write");
                Err(short_name_exists(&short_name))
            }
            Err(e) => Err(e),
        }
    }

    /// Replaces the URL and short name of an existing link.
    ///
    /// Keeping the current short name never conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist (or vanished
    /// before the write).
    /// Returns [`AppError::Conflict`] if the new short name belongs to
    /// another link.
    pub async fn update_link(&self, id: i64, changes: LinkChanges) -> Result<Link, AppError> {
        let current = self.get_link(id).await?;

        if current.short_name != changes.short_name
            && let Some(other) = self
                .link_repository
                .get_by_short_name(&changes.short_name)
                .await?
            && other.id != id
        {
            tracing::warn!(id, short_name = %changes.short_name, "Short name already taken");
            return Err(short_name_exists(&changes.short_name));
        }

        let short_name = changes.short_name.clone();

        match self.link_repository.update(id, changes).await {
            Ok(Some(link)) => {
                tracing::info!(id, short_name = %link.short_name, "Link updated");
                Ok(link)
            }
            Ok(None) => Err(not_found(id)),
            Err(AppError::Conflict { .. }) => {
                tracing::warn!(id, %short_name, "Short name taken by a concurrent write");
                Err(short_name_exists(&short_name))
            }
            Err(e) => Err(e),
        }
    }

    /// Permanently deletes a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        if !self.link_repository.delete(id).await? {
            return Err(not_found(id));
        }

        tracing::info!(id, "Link deleted");
        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::not_found(LINK_NOT_FOUND, json!({ "id": id }))
}

fn short_name_exists(short_name: &str) -> AppError {
    AppError::conflict(SHORT_NAME_EXISTS, json!({ "short_name": short_name }))
}
