//! Core domain entities.
//!
//! - [`Link`] - A stored short link
//! - [`NewLink`] - Input for creating a link
//! - [`LinkChanges`] - Input for replacing a link's fields

pub mod link;

pub use link::{Link, LinkChanges, NewLink};
