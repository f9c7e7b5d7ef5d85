//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use authhub_entity::message::PrincipalRef;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address, used as the login identifier.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    /// Refresh token.
    #[validate(length(min = 10, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Secret code assignment request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetSecretCodeRequest {
    /// Public routing code for receiving messages without exposing the email.
    #[validate(length(min = 4, max = 50, message = "Secret code must be between 4 and 50 characters"))]
    pub secret_code: String,
}

/// Message submission request. Unauthenticated; the recipient is addressed
/// by secret code or by numeric id.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    /// Recipient reference.
    pub recipient: PrincipalRef,
    /// Sender display name.
    #[validate(length(min = 1, max = 255, message = "Sender name is required"))]
    pub sender_name: String,
    /// Sender contact email.
    #[validate(email(message = "Invalid sender email"))]
    pub sender_email: String,
    /// Subject line.
    #[validate(length(min = 1, max = 255, message = "Subject is required"))]
    pub subject: String,
    /// Message body.
    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_rejects_short_password() {
        let req = RegisterRequest {
            email: "alice@example.com".into(),
            password: "short".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_malformed_email() {
        let req = RegisterRequest {
            email: "not-an-email".into(),
            password: "long-enough-password".into(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_send_message_request_accepts_code_recipient() {
        let req: SendMessageRequest = serde_json::from_value(serde_json::json!({
            "recipient": {"type": "code", "value": "blue-falcon"},
            "sender_name": "Bob",
            "sender_email": "bob@example.com",
            "subject": "Hello",
            "content": "Hi there",
        }))
        .unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.recipient, PrincipalRef::Code("blue-falcon".into()));
    }
}
