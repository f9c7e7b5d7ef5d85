//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
///
/// Secrets and lifetimes have **no** serde defaults: a deployment must
/// supply all four values explicitly or configuration loading fails.
/// Lifetimes are compact duration strings (`"15m"`, `"7d"`) parsed with
/// [`super::duration::parse_duration`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for access token signing.
    pub access_secret: String,
    /// HMAC secret for refresh token signing (independent of the access secret).
    pub refresh_secret: String,
    /// Access token lifetime as a duration string, e.g. `"15m"`.
    pub access_expires_in: String,
    /// Refresh token lifetime as a duration string, e.g. `"7d"`.
    pub refresh_expires_in: String,
}
