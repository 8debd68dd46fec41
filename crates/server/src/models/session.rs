//! Session claim types.
//!
//! The claim set embedded in the signed session token. Sessions are
//! stateless: nothing about them is persisted server-side, the token's
//! validity window is the whole lifecycle.

use serde::{Deserialize, Serialize};

use atelier_core::Role;

/// Identity claims carried by a session token.
///
/// Field names follow the registered JWT claim names where one exists
/// (`sub`, `iat`, `exp`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Username the session was issued to.
    pub sub: String,
    /// Role granted at login.
    pub role: Role,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry time, seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    /// Username the session was issued to.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.sub
    }
}
