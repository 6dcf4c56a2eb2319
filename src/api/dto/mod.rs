//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Query values
//! such as `range` are checked by their own parsers.

pub mod health;
pub mod link;
pub mod range;
