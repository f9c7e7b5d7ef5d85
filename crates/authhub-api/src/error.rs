//! Maps domain `AppError` to HTTP responses.
//!
//! Status selection is driven entirely by `ErrorKind`; response bodies
//! never depend on inspecting message text.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use authhub_core::error::{AppError, ErrorKind};

/// Transport-side wrapper for [`AppError`].
///
/// Handlers return `Result<_, ApiError>`; the `From` impl lets `?`
/// propagate domain errors directly.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::EmailTaken | ErrorKind::DuplicateSession | ErrorKind::Conflict => {
                StatusCode::CONFLICT
            }
            ErrorKind::InvalidCredentials
            | ErrorKind::InvalidToken
            | ErrorKind::SessionRevokedOrMissing
            | ErrorKind::PrincipalNotFound
            | ErrorKind::InvalidSignature
            | ErrorKind::Expired => StatusCode::UNAUTHORIZED,
            ErrorKind::InvalidFormat
            | ErrorKind::UnknownUnit
            | ErrorKind::Configuration
            | ErrorKind::Serialization
            | ErrorKind::Database
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Internal server error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ApiErrorResponse {
            error: err.kind.to_string(),
            message: err.message,
        };

        (status, Json(body)).into_response()
    }
}
