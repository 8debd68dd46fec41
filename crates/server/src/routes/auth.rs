//! Login and logout handlers.
//!
//! The login flow is glue over the auth service: check the configured admin
//! credential, mint a token, hand it to the browser as an `HttpOnly` cookie.
//! Nothing about the session is stored server-side, so logout is just the
//! cookie being overwritten.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{AppendHeaders, IntoResponse},
};
use serde::{Deserialize, Serialize};

use atelier_core::Role;

use crate::error::Result;
use crate::middleware::auth::{clear_session_cookie, session_cookie_value};
use crate::services::auth;
use crate::state::AppState;

/// Login form payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
    /// Session expiry, seconds since the Unix epoch.
    pub expires_at: i64,
}

/// Mint a session cookie for the admin identity.
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    auth::verify_credentials(&state.config().admin, &form.username, &form.password)?;

    let (token, claims) = state.tokens().issue(&form.username, Role::Admin)?;
    tracing::info!(user = %claims.sub, "admin session issued");

    let cookie = session_cookie_value(
        &token,
        state.tokens().ttl(),
        state.config().secure_cookies(),
    );

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(LoginResponse {
            username: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }),
    ))
}

/// Clear the session cookie.
///
/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let cookie = clear_session_cookie(state.config().secure_cookies());
    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        StatusCode::NO_CONTENT,
    )
}
