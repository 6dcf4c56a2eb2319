//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, list_links_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET    /links`        - List links (`?range=[start,end]`)
/// - `POST   /links`        - Create a link
/// - `GET    /links/{id}`   - Fetch a link
/// - `PUT    /links/{id}`   - Replace a link's URL and short name
/// - `DELETE /links/{id}`   - Delete a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
}
