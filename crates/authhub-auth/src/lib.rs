//! # authhub-auth
//!
//! Credential issuance, verification, and session lifecycle for AuthHub.
//!
//! ## Modules
//!
//! - `jwt` — claims structures, token issuance, and token verification
//!   with independent access and refresh signing contexts
//! - `password` — Argon2id password hashing and verification
//! - `digest` — SHA-256 digests for refresh tokens at rest
//! - `session` — the session manager and its storage/directory seams

pub mod digest;
pub mod jwt;
pub mod password;
pub mod session;

pub use jwt::{AccessClaims, RefreshClaims, TokenIssuer, TokenVerifier};
pub use password::PasswordHasher;
pub use session::{PrincipalDirectory, RefreshSessionStore, SessionManager};
