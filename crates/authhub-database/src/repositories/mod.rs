//! Concrete repository implementations.

pub mod message;
pub mod refresh_session;
pub mod user;

/// Whether a sqlx error is a unique-constraint violation.
///
/// Uniqueness (email, session ID, secret code) is enforced by the
/// database; callers translate a violation into the appropriate domain
/// error instead of assuming application-level exclusivity.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
