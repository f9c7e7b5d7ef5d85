//! Session lifecycle manager — register, login, refresh, and logout flows.
//!
//! A refresh session moves through three logical states: **active**
//! (not revoked, before expiry), **expired** (not revoked, past expiry,
//! detected lazily at verification time), and **revoked** (one-way, via
//! logout, permitted even after expiry). There is no path back from
//! revoked.
//!
//! Every operation fails fast on the first violated precondition and
//! returns a typed error value; the manager performs no retries and no
//! logging of its own — the transport decides what to report.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::session::NewRefreshSession;
use authhub_entity::user::{CreateUser, User, UserSummary};

use crate::digest::sha256_hex;
use crate::jwt::{TokenIssuer, TokenVerifier};
use crate::password::PasswordHasher;

use super::directory::PrincipalDirectory;
use super::store::RefreshSessionStore;

/// The credential pair returned by every successful auth operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
}

/// Result of a successful register, login, or refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: UserSummary,
    /// Issued credentials.
    pub tokens: AuthTokens,
}

/// Orchestrates the credential lifecycle over injected collaborators.
///
/// All dependencies are handed in at construction; the manager owns no
/// global state and can be driven entirely by test doubles.
pub struct SessionManager {
    /// Token issuance (both signing contexts).
    issuer: Arc<TokenIssuer>,
    /// Token verification (both signing contexts).
    verifier: Arc<TokenVerifier>,
    /// Refresh session persistence.
    store: Arc<dyn RefreshSessionStore>,
    /// Principal lookup and creation.
    directory: Arc<dyn PrincipalDirectory>,
    /// Password hashing and comparison.
    password_hasher: Arc<PasswordHasher>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        issuer: Arc<TokenIssuer>,
        verifier: Arc<TokenVerifier>,
        store: Arc<dyn RefreshSessionStore>,
        directory: Arc<dyn PrincipalDirectory>,
        password_hasher: Arc<PasswordHasher>,
    ) -> Self {
        Self {
            issuer,
            verifier,
            store,
            directory,
            password_hasher,
        }
    }

    /// Registers a new principal and issues a credential pair.
    ///
    /// Fails with `ErrorKind::EmailTaken` when the email is already
    /// registered — checked up front and again enforced by the store's
    /// uniqueness constraint, so a concurrent duplicate registration
    /// still surfaces as `EmailTaken`.
    pub async fn register(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        if self.directory.find_by_email(email).await?.is_some() {
            return Err(AppError::email_taken("Email already in use"));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let user = self
            .directory
            .create(CreateUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        self.issue_session(&user).await
    }

    /// Authenticates a principal by email and password.
    ///
    /// Unknown email and wrong password produce the identical
    /// `ErrorKind::InvalidCredentials` error so the response never
    /// reveals whether the email exists.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let user = self
            .directory
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::invalid_credentials("Invalid email or password"))?;

        let valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::invalid_credentials("Invalid email or password"));
        }

        self.issue_session(&user).await
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// The presented refresh token is returned unchanged: refresh
    /// credentials are not rotated on use, and only the expiry embedded
    /// in the signed claims is consulted — the persisted record gates
    /// revocation, not expiry.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AuthSession> {
        let claims = self
            .verifier
            .verify_refresh(refresh_token)
            .map_err(|e| AppError::with_source(ErrorKind::InvalidToken, "Invalid refresh token", e))?;

        let usable = self
            .store
            .find_by_session_id(claims.sid)
            .await?
            .is_some_and(|s| !s.revoked);
        if !usable {
            return Err(AppError::session_revoked_or_missing(
                "Refresh session revoked or missing",
            ));
        }

        let user = self
            .directory
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::principal_not_found("User not found"))?;

        let (access_token, _) = self.issuer.issue_access(user.id, &user.email)?;

        Ok(AuthSession {
            user: user.summary(),
            tokens: AuthTokens {
                access_token,
                refresh_token: refresh_token.to_string(),
            },
        })
    }

    /// Revokes every refresh session owned by the principal.
    ///
    /// Idempotent; succeeds even when the principal has no sessions.
    pub async fn logout(&self, user_id: i64) -> AppResult<()> {
        self.store.revoke_all_for_user(user_id).await?;
        Ok(())
    }

    /// Mints the credential pair for a user and persists the refresh
    /// session with a one-way digest of the raw token.
    async fn issue_session(&self, user: &User) -> AppResult<AuthSession> {
        let (access_token, _) = self.issuer.issue_access(user.id, &user.email)?;
        let issued = self.issuer.issue_refresh(user.id)?;

        self.store
            .save(NewRefreshSession {
                session_id: issued.session_id,
                token_digest: sha256_hex(&issued.token),
                expires_at: issued.expires_at,
                user_id: user.id,
            })
            .await?;

        Ok(AuthSession {
            user: user.summary(),
            tokens: AuthTokens {
                access_token,
                refresh_token: issued.token,
            },
        })
    }
}
