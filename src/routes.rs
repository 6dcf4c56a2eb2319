//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /ping`        - Liveness probe
//! - `GET  /health`      - Health check (database)
//! - `/api/links*`       - Link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from configuration, `Content-Range` exposed
//!
//! Trailing-slash normalisation wraps the router in [`crate::server`], since
//! it must run before routing.

use crate::api;
use crate::api::handlers::{health_handler, ping_handler};
use crate::api::middleware::{cors, tracing};
use crate::config::CorsOrigins;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `cors_origins` - browser origins allowed to call the API
pub fn app_router(state: AppState, cors_origins: &CorsOrigins) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(cors::layer(cors_origins))
        .layer(tracing::layer())
}
