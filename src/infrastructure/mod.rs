//! Infrastructure layer for external integrations.
//!
//! Implements the repository traits defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL and SQLite repository implementations

pub mod persistence;
