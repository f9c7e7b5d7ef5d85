//! Refresh session persistence seam.
//!
//! The session manager talks to storage through [`RefreshSessionStore`]
//! so tests can substitute an in-memory double; the production
//! implementation wraps the database repository.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use authhub_core::result::AppResult;
use authhub_database::repositories::refresh_session::RefreshSessionRepository;
use authhub_entity::session::{NewRefreshSession, RefreshSession};

/// Persistence operations for refresh sessions.
#[async_trait]
pub trait RefreshSessionStore: Send + Sync {
    /// Insert a new refresh session record.
    ///
    /// Fails with `ErrorKind::DuplicateSession` when a record with the
    /// same session identifier already exists.
    async fn save(&self, session: NewRefreshSession) -> AppResult<RefreshSession>;

    /// Find a refresh session by its session identifier.
    async fn find_by_session_id(&self, session_id: Uuid) -> AppResult<Option<RefreshSession>>;

    /// Mark every refresh session owned by the user as revoked.
    ///
    /// Idempotent; succeeds even when no records match. Returns the
    /// number of records updated.
    async fn revoke_all_for_user(&self, user_id: i64) -> AppResult<u64>;
}

/// Production store backed by the PostgreSQL repository.
#[derive(Debug, Clone)]
pub struct DbRefreshSessionStore {
    repo: Arc<RefreshSessionRepository>,
}

impl DbRefreshSessionStore {
    /// Creates a store wrapping the given repository.
    pub fn new(repo: Arc<RefreshSessionRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RefreshSessionStore for DbRefreshSessionStore {
    async fn save(&self, session: NewRefreshSession) -> AppResult<RefreshSession> {
        self.repo.create(&session).await
    }

    async fn find_by_session_id(&self, session_id: Uuid) -> AppResult<Option<RefreshSession>> {
        self.repo.find_by_session_id(session_id).await
    }

    async fn revoke_all_for_user(&self, user_id: i64) -> AppResult<u64> {
        self.repo.revoke_all_for_user(user_id).await
    }
}
