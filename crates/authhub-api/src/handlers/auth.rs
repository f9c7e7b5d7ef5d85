//! Auth handlers — register, login, refresh, logout.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use validator::Validate;

use authhub_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{SessionResponse, StatusResponse, TokenResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .session_manager
        .register(&req.email, &req.password)
        .await?;

    Ok((StatusCode::CREATED, Json(session.into())))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(session.into()))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let session = state.session_manager.refresh(&req.refresh_token).await?;

    Ok(Json(session.tokens.into()))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StatusResponse>, ApiError> {
    state.session_manager.logout(auth.user_id).await?;

    Ok(Json(StatusResponse::new("Logged out successfully")))
}
