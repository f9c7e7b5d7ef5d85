//! Application state shared across all handlers.

use std::sync::Arc;

use authhub_auth::jwt::TokenVerifier;
use authhub_auth::session::{PrincipalDirectory, SessionManager};
use authhub_database::DatabasePool;
use authhub_database::repositories::message::MessageRepository;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the only shared mutable
/// state in the process is the database connection pool inside
/// [`DatabasePool`].
#[derive(Clone)]
pub struct AppState {
    /// Database pool (for health checks).
    pub db: DatabasePool,
    /// Session lifecycle manager.
    pub session_manager: Arc<SessionManager>,
    /// Access token verification for protected routes.
    pub verifier: Arc<TokenVerifier>,
    /// Principal lookup (mailbox recipient resolution, secret codes).
    pub directory: Arc<dyn PrincipalDirectory>,
    /// Mailbox message repository.
    pub messages: Arc<MessageRepository>,
}
