//! Refresh session repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::{NewRefreshSession, RefreshSession};

use super::is_unique_violation;

/// Repository for refresh session persistence and revocation.
///
/// Each method is a single SQL statement, so every mutation commits
/// atomically: a row is either fully written or not written at all.
#[derive(Debug, Clone)]
pub struct RefreshSessionRepository {
    pool: PgPool,
}

impl RefreshSessionRepository {
    /// Create a new refresh session repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new refresh session row.
    ///
    /// The `session_id` uniqueness constraint is enforced by the database;
    /// a violation surfaces as `ErrorKind::DuplicateSession`.
    pub async fn create(&self, data: &NewRefreshSession) -> AppResult<RefreshSession> {
        sqlx::query_as::<_, RefreshSession>(
            "INSERT INTO refresh_sessions (session_id, token_digest, expires_at, user_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.session_id)
        .bind(&data.token_digest)
        .bind(data.expires_at)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::duplicate_session(format!("Session {} already exists", data.session_id))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create refresh session", e)
            }
        })
    }

    /// Find a refresh session by its session identifier.
    pub async fn find_by_session_id(&self, session_id: Uuid) -> AppResult<Option<RefreshSession>> {
        sqlx::query_as::<_, RefreshSession>(
            "SELECT * FROM refresh_sessions WHERE session_id = $1",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh session", e)
        })
    }

    /// Mark every refresh session owned by the user as revoked.
    ///
    /// Idempotent: succeeds regardless of how many rows match, including
    /// zero. Returns the number of rows updated.
    pub async fn revoke_all_for_user(&self, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query("UPDATE refresh_sessions SET revoked = TRUE WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke refresh sessions", e)
            })?;

        Ok(result.rows_affected())
    }
}
