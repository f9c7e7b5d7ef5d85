//! Mailbox handlers.
//!
//! Sending is unauthenticated by design: anyone holding a user's secret
//! code (or id) may drop a message into that user's mailbox. Reading,
//! marking read, and deleting require the mailbox owner's access token.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use validator::Validate;

use authhub_core::error::AppError;
use authhub_entity::message::{Message, NewMessage, PrincipalRef};

use crate::dto::request::SendMessageRequest;
use crate::dto::response::StatusResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/messages
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<StatusResponse>), ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let recipient = match &req.recipient {
        PrincipalRef::Code(code) => state.directory.find_by_secret_code(code).await?,
        PrincipalRef::Id(id) => state.directory.find_by_id(*id).await?,
    }
    .ok_or_else(|| AppError::not_found("Recipient not found"))?;

    state
        .messages
        .create(&NewMessage {
            sender_name: req.sender_name,
            sender_email: req.sender_email,
            subject: Some(req.subject),
            content: req.content,
            user_id: recipient.id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(StatusResponse::new("Message sent"))))
}

/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Message>>, ApiError> {
    let messages = state.messages.find_by_user(auth.user_id).await?;
    Ok(Json(messages))
}

/// PUT /api/messages/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<Message>, ApiError> {
    let message = state.messages.mark_read(id, auth.user_id).await?;
    Ok(Json(message))
}

/// DELETE /api/messages/{id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<StatusResponse>, ApiError> {
    state.messages.delete(id, auth.user_id).await?;
    Ok(Json(StatusResponse::new("Message deleted")))
}
