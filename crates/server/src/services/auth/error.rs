//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
///
/// None of these are echoed verbatim to clients; the handler boundary maps
/// them to a generic 401 body and logs the concrete kind server-side.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The signing secret is empty. Verification never proceeds without a
    /// secret (fail closed).
    #[error("signing secret is empty")]
    EmptySecret,

    /// Invalid credentials (wrong username or password).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The token's signature does not match (tampering or wrong secret).
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's validity window has passed.
    #[error("token expired")]
    Expired,

    /// The token could not be decoded at all.
    #[error("malformed token")]
    Malformed,

    /// Token encoding failed at issue time.
    #[error("token issue failed: {0}")]
    Issue(jsonwebtoken::errors::Error),
}
