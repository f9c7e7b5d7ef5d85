//! JWT token creation with independent access and refresh signing contexts.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use authhub_core::clock::Clock;
use authhub_core::config::auth::AuthConfig;
use authhub_core::config::duration::parse_duration;
use authhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};

/// Creates signed access and refresh tokens.
///
/// The two contexts never share a key: an access token cannot verify
/// against the refresh secret and vice versa. Lifetimes are parsed from
/// the configured duration strings at construction, so a malformed
/// configuration fails at startup rather than on first issuance.
pub struct TokenIssuer {
    /// HMAC key for access token signing.
    access_key: EncodingKey,
    /// HMAC key for refresh token signing.
    refresh_key: EncodingKey,
    /// Access token lifetime.
    access_lifetime: Duration,
    /// Refresh token lifetime.
    refresh_lifetime: Duration,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_lifetime", &self.access_lifetime)
            .field("refresh_lifetime", &self.refresh_lifetime)
            .finish()
    }
}

/// Result of a refresh token issuance.
///
/// The caller is responsible for persisting a session record under
/// `session_id`; issuance itself has no side effects.
#[derive(Debug, Clone)]
pub struct IssuedRefresh {
    /// The signed refresh token.
    pub token: String,
    /// The freshly generated session identifier bound into the token.
    pub session_id: Uuid,
    /// Absolute expiry instant embedded in the token.
    pub expires_at: DateTime<Utc>,
}

impl TokenIssuer {
    /// Creates a new issuer from auth configuration.
    pub fn new(config: &AuthConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        Ok(Self {
            access_key: EncodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_lifetime: parse_duration(&config.access_expires_in)?,
            refresh_lifetime: parse_duration(&config.refresh_expires_in)?,
            clock,
        })
    }

    /// Generates a signed access token for the given user.
    pub fn issue_access(
        &self,
        user_id: i64,
        email: &str,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = self.clock.now();
        let expires_at = now + self.access_lifetime;

        let claims = AccessClaims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.access_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok((token, expires_at))
    }

    /// Generates a signed refresh token with a fresh session identifier.
    pub fn issue_refresh(&self, user_id: i64) -> Result<IssuedRefresh, AppError> {
        let now = self.clock.now();
        let expires_at = now + self.refresh_lifetime;
        let session_id = Uuid::new_v4();

        let claims = RefreshClaims {
            sub: user_id,
            sid: session_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_key)
            .map_err(|e| AppError::internal(format!("Failed to encode refresh token: {e}")))?;

        Ok(IssuedRefresh {
            token,
            session_id,
            expires_at,
        })
    }
}
