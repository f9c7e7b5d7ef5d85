//! User profile handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use authhub_core::error::AppError;
use authhub_entity::user::UserSummary;

use crate::dto::request::SetSecretCodeRequest;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserSummary>, ApiError> {
    let user = state
        .directory
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::principal_not_found("User not found"))?;

    Ok(Json(user.summary()))
}

/// PUT /api/users/me/secret-code
pub async fn set_secret_code(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SetSecretCodeRequest>,
) -> Result<Json<UserSummary>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .directory
        .set_secret_code(auth.user_id, &req.secret_code)
        .await?;

    Ok(Json(user.summary()))
}
