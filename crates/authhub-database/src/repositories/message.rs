//! Mailbox message repository implementation.

use sqlx::PgPool;

use authhub_core::error::{AppError, ErrorKind};
use authhub_core::result::AppResult;
use authhub_entity::message::{Message, NewMessage};

/// Repository for mailbox message CRUD.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new message.
    pub async fn create(&self, data: &NewMessage) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages (sender_name, sender_email, subject, content, user_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(&data.sender_name)
        .bind(&data.sender_email)
        .bind(&data.subject)
        .bind(&data.content)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))
    }

    /// List all messages for a user, newest first.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Mark a message as read. The message must belong to the user.
    pub async fn mark_read(&self, message_id: i64, user_id: i64) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(message_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark message read", e))?
        .ok_or_else(|| AppError::not_found(format!("Message {message_id} not found")))
    }

    /// Delete a message. The message must belong to the user.
    pub async fn delete(&self, message_id: i64, user_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1 AND user_id = $2")
            .bind(message_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete message", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Message {message_id} not found"
            )));
        }
        Ok(())
    }
}
