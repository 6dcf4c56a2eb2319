//! Cross-origin resource sharing configuration.

use axum::http::{HeaderValue, header};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::CorsOrigins;

/// Creates a CORS layer from the configured origins.
///
/// - [`CorsOrigins::Any`] reflects the request's `Origin` back.
/// - [`CorsOrigins::List`] allows exactly those origins.
///
/// Both modes allow credentials and mirror the requested method and headers.
/// `Content-Range` is always exposed so browser clients can read the
/// pagination metadata of `GET /api/links`.
pub fn layer(origins: &CorsOrigins) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .expose_headers([header::CONTENT_RANGE]);

    match origins {
        CorsOrigins::Any => base.allow_origin(AllowOrigin::mirror_request()),
        CorsOrigins::List(list) => {
            let origins: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();

            base.allow_origin(AllowOrigin::list(origins))
        }
    }
}
