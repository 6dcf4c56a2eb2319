//! Handlers for the link resource (list, create, get, update, delete).

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::api::dto::link::{LinkRequest, LinkResponse};
use crate::api::dto::range::{ContentRange, LinkRange, ListLinksParams};
use crate::application::services::LinkService;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Lists links, optionally restricted to an inclusive index range.
///
/// # Endpoint
///
/// `GET /api/links?range=[start,end]`
///
/// # Response
///
/// A JSON array of links in creation order, plus a header such as
/// `Content-Range: links 0-9/42`. The total is counted before the slice is
/// fetched.
///
/// # Errors
///
/// Returns 400 Bad Request if `range` is malformed or `end < start`.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(params): Query<ListLinksParams>,
) -> Result<impl IntoResponse, AppError> {
    let range = params.range.as_deref().map(LinkRange::parse).transpose()?;

    let (links, content_range) = fetch_page(&state.link_service, range).await?;

    let items: Vec<LinkResponse> = links
        .into_iter()
        .map(|link| LinkResponse::from_link(link, &state.base_url))
        .collect();

    Ok((
        [(header::CONTENT_RANGE, content_range.to_string())],
        Json(items),
    ))
}

/// Fetches one listing page and its `Content-Range` metadata.
///
/// `total` is counted before the slice is read, once per call.
pub async fn fetch_page(
    service: &LinkService<dyn LinkRepository>,
    range: Option<LinkRange>,
) -> Result<(Vec<Link>, ContentRange), AppError> {
    let total = service.count().await?;

    match range {
        Some(range) => {
            let links = service
                .list(Some(range.offset()), Some(range.limit()))
                .await?;
            let content_range = ContentRange::ranged(range, links.len(), total);
            Ok((links, content_range))
        }
        None => {
            let links = service.list(None, None).await?;
            let content_range = ContentRange::unranged(links.len(), total);
            Ok((links, content_range))
        }
    }
}

/// Creates a link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// ```json
/// { "original_url": "https://example.com/long-url", "short_name": "exmpl" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the short name already exists.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let link = state.link_service.create_link(payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}

/// Returns a single link.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn get_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(id).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Replaces a link's URL and short name.
///
/// # Endpoint
///
/// `PUT /api/links/{id}`
///
/// Submitting the link's current short name is always accepted.
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
/// Returns 400 Bad Request if the new short name belongs to another link.
pub async fn update_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.update_link(id, payload.into()).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this id.
pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
