//! Mailbox message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A message delivered to a user's mailbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: i64,
    /// Display name of the sender.
    pub sender_name: String,
    /// Email address of the sender.
    pub sender_email: String,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub content: String,
    /// Whether the recipient has read the message.
    pub is_read: bool,
    /// When the message was created.
    pub created_at: DateTime<Utc>,
    /// The recipient user.
    pub user_id: i64,
}

/// Data required to create a new message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMessage {
    /// Display name of the sender.
    pub sender_name: String,
    /// Email address of the sender.
    pub sender_email: String,
    /// Optional subject line.
    pub subject: Option<String>,
    /// Message body.
    pub content: String,
    /// The recipient user.
    pub user_id: i64,
}

/// How a message recipient is addressed.
///
/// The caller states explicitly whether the value is a secret code or a
/// numeric user ID; the shape of the string is never used to guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PrincipalRef {
    /// Addressed by the user's secret code.
    Code(String),
    /// Addressed by the numeric user ID.
    Id(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_principal_ref_round_trips_as_tagged_json() {
        let by_code: PrincipalRef =
            serde_json::from_str(r#"{"type": "code", "value": "6789"}"#).unwrap();
        assert_eq!(by_code, PrincipalRef::Code("6789".to_string()));

        let by_id: PrincipalRef = serde_json::from_str(r#"{"type": "id", "value": 42}"#).unwrap();
        assert_eq!(by_id, PrincipalRef::Id(42));
    }

    #[test]
    fn test_principal_ref_rejects_untagged_value() {
        // A bare string must not be inferred as either variant.
        assert!(serde_json::from_str::<PrincipalRef>(r#""6789""#).is_err());
    }
}
