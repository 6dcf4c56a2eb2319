//! Helpers for classifying database errors.

/// Returns `true` when the error is a unique-constraint violation reported by
/// the database driver (PostgreSQL `23505`, SQLite `SQLITE_CONSTRAINT_UNIQUE`).
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
}

/// Returns `true` when the violated constraint guards `links.short_name`.
///
/// PostgreSQL reports the constraint name; SQLite does not, so any unique
/// violation on the links table is accepted there.
pub fn is_short_name_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some("links_short_name_key") | None)
}
