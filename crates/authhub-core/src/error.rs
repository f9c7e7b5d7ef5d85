//! Unified application error types for AuthHub.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. The `kind` field is the whole
//! contract with the transport layer: HTTP status selection is done on
//! `ErrorKind` alone, never by inspecting message strings.

use std::fmt;
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, concurrent modification, etc.).
    Conflict,
    /// A duration string did not match `<amount><unit>`.
    InvalidFormat,
    /// A duration unit outside {m, h, d} was captured.
    UnknownUnit,
    /// A token signature did not verify.
    InvalidSignature,
    /// A correctly signed token has passed its embedded expiry.
    Expired,
    /// Registration attempted with an email that is already taken.
    EmailTaken,
    /// Login failed; deliberately covers both unknown email and bad password.
    InvalidCredentials,
    /// A presented token is malformed or failed verification.
    InvalidToken,
    /// The refresh session backing a token is revoked or does not exist.
    SessionRevokedOrMissing,
    /// The principal referenced by a token no longer exists.
    PrincipalNotFound,
    /// A refresh session with this session ID already exists.
    DuplicateSession,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::InvalidFormat => write!(f, "INVALID_FORMAT"),
            Self::UnknownUnit => write!(f, "UNKNOWN_UNIT"),
            Self::InvalidSignature => write!(f, "INVALID_SIGNATURE"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::EmailTaken => write!(f, "EMAIL_TAKEN"),
            Self::InvalidCredentials => write!(f, "INVALID_CREDENTIALS"),
            Self::InvalidToken => write!(f, "INVALID_TOKEN"),
            Self::SessionRevokedOrMissing => write!(f, "SESSION_REVOKED_OR_MISSING"),
            Self::PrincipalNotFound => write!(f, "PRINCIPAL_NOT_FOUND"),
            Self::DuplicateSession => write!(f, "DUPLICATE_SESSION"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// The unified application error used throughout AuthHub.
///
/// All crate-specific errors are mapped into `AppError` using `From` impls
/// or explicit `.map_err()` calls. Every failure is a reported value,
/// never a panic; no operation in the core is process-fatal.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an invalid-format error (duration parsing).
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFormat, message)
    }

    /// Create an unknown-unit error (duration parsing).
    pub fn unknown_unit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownUnit, message)
    }

    /// Create an invalid-signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSignature, message)
    }

    /// Create an expired-token error.
    pub fn expired(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Expired, message)
    }

    /// Create an email-taken error.
    pub fn email_taken(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmailTaken, message)
    }

    /// Create an invalid-credentials error.
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCredentials, message)
    }

    /// Create an invalid-token error.
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidToken, message)
    }

    /// Create a session-revoked-or-missing error.
    pub fn session_revoked_or_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SessionRevokedOrMissing, message)
    }

    /// Create a principal-not-found error.
    pub fn principal_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PrincipalNotFound, message)
    }

    /// Create a duplicate-session error.
    pub fn duplicate_session(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateSession, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_preserved_through_clone() {
        let err = AppError::with_source(
            ErrorKind::Database,
            "query failed",
            std::io::Error::other("connection reset"),
        );
        let cloned = err.clone();
        assert_eq!(cloned.kind, ErrorKind::Database);
        assert_eq!(cloned.message, "query failed");
        assert!(cloned.source.is_none());
    }

    #[test]
    fn test_display_includes_kind_and_message() {
        let err = AppError::invalid_credentials("invalid email or password");
        assert_eq!(
            err.to_string(),
            "INVALID_CREDENTIALS: invalid email or password"
        );
    }
}
