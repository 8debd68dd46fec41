//! Authentication middleware and extractors.
//!
//! The gate over every protected route: reads the session cookie, verifies
//! the token through the state's [`TokenService`], and hands the verified
//! claims to the handler as an explicit argument. Requests without a valid
//! session never reach the handler.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     RequireAdmin(claims): RequireAdmin,
//! ) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.username())
//! }
//! ```

use std::time::Duration;

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::SessionClaims;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "token";

/// Extractor that requires a verified admin session.
///
/// Rejects with 401 if the cookie is absent or its token fails
/// verification. The response body never distinguishes the failure kind;
/// that distinction lives in the server logs.
pub struct RequireAdmin(pub SessionClaims);

/// Rejection returned when a request carries no usable session.
pub enum AuthRejection {
    /// No session cookie was presented.
    MissingToken,
    /// A cookie was presented but its token did not verify.
    InvalidOrExpiredToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        // Same generic body for both reasons.
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Authentication required" })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let Some(token) = session_cookie(&parts.headers) else {
            tracing::warn!(
                path = %parts.uri.path(),
                "rejected request without a session cookie"
            );
            return Err(AuthRejection::MissingToken);
        };

        match state.tokens().verify(&token) {
            Ok(claims) => Ok(Self(claims)),
            Err(err) => {
                tracing::warn!(
                    path = %parts.uri.path(),
                    reason = %err,
                    "rejected request with an unverifiable session token"
                );
                Err(AuthRejection::InvalidOrExpiredToken)
            }
        }
    }
}

/// Extract the session token from the request's `Cookie` headers.
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_owned())
}

/// Build the `Set-Cookie` value that establishes a session.
#[must_use]
pub fn session_cookie_value(token: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that tears a session down.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
