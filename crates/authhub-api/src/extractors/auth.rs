//! `AuthUser` extractor — pulls the JWT from the Authorization header and verifies it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use authhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user id.
    pub user_id: i64,
    /// Email carried in the access token.
    pub email: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::invalid_token("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::invalid_token("Invalid Authorization header format"))?;

        let claims = state.verifier.verify_access(token)?;

        Ok(Self {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}
