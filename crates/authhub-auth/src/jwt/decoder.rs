//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::de::DeserializeOwned;

use authhub_core::config::auth::AuthConfig;
use authhub_core::error::AppError;

use super::claims::{AccessClaims, RefreshClaims};

/// Validates signed tokens against the respective signing context.
///
/// Signature and expiry checks are both always performed: an expired but
/// correctly signed token is rejected, with zero clock leeway.
#[derive(Clone)]
pub struct TokenVerifier {
    /// HMAC key for access token verification.
    access_key: DecodingKey,
    /// HMAC key for refresh token verification.
    refresh_key: DecodingKey,
    /// Validation configuration shared by both contexts.
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a new verifier from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        Self {
            access_key: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.verify::<AccessClaims>(token, &self.access_key)
    }

    /// Decodes and validates a refresh token string.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AppError> {
        self.verify::<RefreshClaims>(token, &self.refresh_key)
    }

    fn verify<C: DeserializeOwned>(&self, token: &str, key: &DecodingKey) -> Result<C, AppError> {
        let data = decode::<C>(token, key, &self.validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AppError::expired("Token has expired")
            }
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                AppError::invalid_signature("Invalid token signature")
            }
            _ => AppError::invalid_token(format!("Token validation failed: {e}")),
        })?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::{DateTime, Duration, Utc};

    use authhub_core::clock::Clock;
    use authhub_core::config::auth::AuthConfig;
    use authhub_core::error::ErrorKind;

    use crate::jwt::encoder::TokenIssuer;

    use super::*;

    #[derive(Debug)]
    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn at(instant: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(instant)))
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn test_config() -> AuthConfig {
        AuthConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_expires_in: "15m".to_string(),
            refresh_expires_in: "7d".to_string(),
        }
    }

    fn issuer_at(instant: DateTime<Utc>) -> TokenIssuer {
        TokenIssuer::new(&test_config(), FixedClock::at(instant)).unwrap()
    }

    #[test]
    fn test_access_token_round_trip() {
        let issuer = issuer_at(Utc::now());
        let verifier = TokenVerifier::new(&test_config());

        let (token, _) = issuer.issue_access(42, "a@x.com").unwrap();
        let claims = verifier.verify_access(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn test_refresh_token_round_trip_carries_session_id() {
        let issuer = issuer_at(Utc::now());
        let verifier = TokenVerifier::new(&test_config());

        let issued = issuer.issue_refresh(7).unwrap();
        let claims = verifier.verify_refresh(&issued.token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.sid, issued.session_id);
        // Claims carry second resolution.
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_expired_but_correctly_signed_token_is_rejected() {
        // Issue from eight days in the past so the 7d refresh lifetime
        // has already elapsed.
        let issuer = issuer_at(Utc::now() - Duration::days(8));
        let verifier = TokenVerifier::new(&test_config());

        let issued = issuer.issue_refresh(7).unwrap();
        let err = verifier.verify_refresh(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expired);
    }

    #[test]
    fn test_signing_contexts_are_independent() {
        let issuer = issuer_at(Utc::now());
        let verifier = TokenVerifier::new(&test_config());

        // An access token must not verify in the refresh context.
        let (token, _) = issuer.issue_access(1, "a@x.com").unwrap();
        let err = verifier.verify_refresh(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_token_signed_with_wrong_secret_is_rejected() {
        let issuer = issuer_at(Utc::now());
        let mut other = test_config();
        other.access_secret = "a-different-secret".to_string();
        let verifier = TokenVerifier::new(&other);

        let (token, _) = issuer.issue_access(1, "a@x.com").unwrap();
        let err = verifier.verify_access(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidSignature);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let verifier = TokenVerifier::new(&test_config());
        let err = verifier.verify_access("not-a-token").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
