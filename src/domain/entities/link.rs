//! Link entity representing a short name to URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `id` is assigned by storage and grows in creation order, so ordering by
/// `id` gives the listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_name: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_name: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_name,
            created_at,
        }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_name: String,
}

/// Full replacement of the mutable fields of a link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkChanges {
    pub original_url: String,
    pub short_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "https://example.com".to_string(),
            "exmpl".to_string(),
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_name, "exmpl");
        assert_eq!(link.created_at, now);
    }
}
