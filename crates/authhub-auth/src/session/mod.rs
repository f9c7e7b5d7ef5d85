//! Session lifecycle management.

pub mod directory;
pub mod manager;
pub mod store;

pub use directory::{DbPrincipalDirectory, PrincipalDirectory};
pub use manager::{AuthSession, AuthTokens, SessionManager};
pub use store::{DbRefreshSessionStore, RefreshSessionStore};
