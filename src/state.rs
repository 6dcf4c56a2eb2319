//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::Database;

/// Cheaply cloneable handle to services and immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub database: Database,
    /// Prefix for rendered `short_url` values, fixed at startup.
    pub base_url: Arc<str>,
}

impl AppState {
    /// Wires the link service to the repository of `database`.
    pub fn new(database: Database, base_url: impl Into<Arc<str>>) -> Self {
        let link_service = Arc::new(LinkService::new(database.link_repository()));

        Self {
            link_service,
            database,
            base_url: base_url.into(),
        }
    }
}
