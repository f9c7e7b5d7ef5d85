//! Refresh session entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One outstanding refresh credential.
///
/// A row is created on every successful login, registration, or token
/// issuance. The raw refresh token is never stored; only a one-way digest
/// of it. Rows are never physically deleted by the application: the only
/// mutation is flipping `revoked` from `false` to `true`, and cascade
/// deletion on user removal is handled by the database schema.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshSession {
    /// Surrogate primary key.
    pub id: i64,
    /// Globally unique session identifier; also the `sid` claim inside
    /// the signed refresh token.
    pub session_id: Uuid,
    /// SHA-256 digest of the raw refresh token.
    pub token_digest: String,
    /// Whether this session has been revoked. One-way: never un-revoked.
    pub revoked: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// Absolute expiry instant of the refresh credential.
    pub expires_at: DateTime<Utc>,
    /// The owning user.
    pub user_id: i64,
}

/// Data required to persist a new refresh session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRefreshSession {
    /// Globally unique session identifier.
    pub session_id: Uuid,
    /// SHA-256 digest of the raw refresh token.
    pub token_digest: String,
    /// Absolute expiry of the refresh credential.
    pub expires_at: DateTime<Utc>,
    /// The owning user.
    pub user_id: i64,
}
