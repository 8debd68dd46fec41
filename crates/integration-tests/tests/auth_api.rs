//! Integration tests for the session boundary.
//!
//! Login, logout, and the middleware gate over protected routes. The store
//! must never be touched by a rejected request.

use axum::http::{StatusCode, header};
use serde_json::json;

use atelier_integration_tests::{
    ADMIN_USERNAME, TestContext, body_json, delete, get, post_json,
};

#[tokio::test]
async fn test_login_sets_httponly_session_cookie() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(post_json(
            "/api/auth/login",
            &json!({
                "username": ADMIN_USERNAME,
                "password": atelier_integration_tests::ADMIN_PASSWORD,
            }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie is set")
        .to_str()
        .expect("cookie is ASCII");
    assert!(set_cookie.starts_with("token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let body = body_json(response).await;
    assert_eq!(body["username"], ADMIN_USERNAME);
    assert_eq!(body["role"], "admin");
    assert!(body["expires_at"].is_i64());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(post_json(
            "/api/auth/login",
            &json!({
                "username": ADMIN_USERNAME,
                "password": "not-the-password",
            }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_with_unknown_username_is_unauthorized() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(post_json(
            "/api/auth/login",
            &json!({
                "username": "eve",
                "password": atelier_integration_tests::ADMIN_PASSWORD,
            }),
            None,
        ))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_mutation_without_cookie_is_rejected_and_store_untouched() {
    let ctx = TestContext::new().await;

    let response = ctx
        .send(post_json(
            "/api/projects",
            &json!({ "title": "Sneaky", "description": "no session" }),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The collection is still empty, in memory and on disk.
    let list = body_json(ctx.send(get("/api/projects", None)).await).await;
    assert_eq!(list, json!([]));

    let on_disk = std::fs::read_to_string(ctx.document_path("projects"))
        .expect("document exists");
    let on_disk: serde_json::Value = serde_json::from_str(&on_disk).expect("document is JSON");
    assert_eq!(on_disk["projects"], json!([]));
}

#[tokio::test]
async fn test_mutation_with_tampered_cookie_is_rejected() {
    let ctx = TestContext::new().await;
    let cookie = ctx.login().await;

    // Flip the final character of the token.
    let mut tampered = cookie.clone();
    let last = tampered.pop().expect("cookie is non-empty");
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = ctx
        .send(delete("/api/projects/1", Some(&tampered)))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    // Generic message only; the failure kind stays in the server logs.
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_cookie_signed_with_different_secret_is_rejected() {
    let ctx = TestContext::new().await;

    // A structurally valid token from a *different* server instance.
    use atelier_core::Role;
    use atelier_server::services::auth::TokenService;
    let other = TokenService::new(
        &secrecy::SecretString::from("zX8cV2bN6mQ4wE0rT9yU3iO7pA5sD1fG"),
        std::time::Duration::from_secs(3600),
    )
    .expect("secret is non-empty");
    let (token, _) = other.issue("curator", Role::Admin).expect("issue succeeds");

    let response = ctx
        .send(delete("/api/projects/1", Some(&format!("token={token}"))))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    // A one-second session: expired two seconds later at the latest.
    let ctx = TestContext::with_session_ttl(std::time::Duration::from_secs(1)).await;
    let cookie = ctx.login().await;

    tokio::time::sleep(std::time::Duration::from_millis(2100)).await;

    let response = ctx
        .send(post_json(
            "/api/projects",
            &json!({ "title": "Late", "description": "session lapsed" }),
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_the_cookie() {
    let ctx = TestContext::new().await;

    let response = ctx.send(post_json("/api/auth/logout", &json!({}), None)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout overwrites the cookie")
        .to_str()
        .expect("cookie is ASCII");
    assert!(set_cookie.starts_with("token=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}
