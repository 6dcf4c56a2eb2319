//! DTOs for the link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Link, LinkChanges, NewLink};

/// Request body for `POST /api/links` and `PUT /api/links/{id}`.
///
/// Both fields are required but taken as given: `original_url` gets no URL
/// format check and an empty string is a valid value for either field.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub original_url: String,
    pub short_name: String,
}

impl From<LinkRequest> for NewLink {
    fn from(req: LinkRequest) -> Self {
        Self {
            original_url: req.original_url,
            short_name: req.short_name,
        }
    }
}

impl From<LinkRequest> for LinkChanges {
    fn from(req: LinkRequest) -> Self {
        Self {
            original_url: req.original_url,
            short_name: req.short_name,
        }
    }
}

/// JSON representation of a link.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    /// Renders a link, deriving `short_url` from `base_url`.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        let short_url = short_url(base_url, &link.short_name);

        Self {
            id: link.id,
            original_url: link.original_url,
            short_name: link.short_name,
            short_url,
            created_at: link.created_at,
        }
    }
}

/// Builds the public short URL: `{base_url}/r/{short_name}`.
///
/// `base_url` is joined verbatim, trailing slashes included.
pub fn short_url(base_url: &str, short_name: &str) -> String {
    format!("{base_url}/r/{short_name}")
}
