//! Integration tests for Atelier.
//!
//! The tests drive the assembled router in-process with
//! `tower::ServiceExt::oneshot`: no listening socket, no external services,
//! one scratch data directory per test context.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p atelier-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode, header};
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use atelier_server::config::{AdminCredentials, ServerConfig};
use atelier_server::routes;
use atelier_server::state::AppState;

/// Username accepted by the test configuration.
pub const ADMIN_USERNAME: &str = "curator";
/// Password accepted by the test configuration.
pub const ADMIN_PASSWORD: &str = "kk-9001-brushed-aluminium";
/// High-entropy signing secret that passes startup validation.
pub const JWT_SECRET: &str = "mJ4kX9qW2zR7vT5bN8cL3fH6gD1sA0pE";

/// An in-process server instance backed by a scratch data directory.
pub struct TestContext {
    app: Router,
    data_dir: TempDir,
}

impl TestContext {
    /// Build a context with the default one-hour session lifetime.
    pub async fn new() -> Self {
        Self::with_session_ttl(Duration::from_secs(3600)).await
    }

    /// Build a context with a specific session lifetime.
    pub async fn with_session_ttl(session_ttl: Duration) -> Self {
        let data_dir = TempDir::new().expect("failed to create scratch data directory");

        let config = ServerConfig {
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            base_url: "http://localhost:4000".to_string(),
            data_dir: data_dir.path().to_path_buf(),
            jwt_secret: SecretString::from(JWT_SECRET),
            session_ttl,
            admin: AdminCredentials {
                username: ADMIN_USERNAME.to_string(),
                password: SecretString::from(ADMIN_PASSWORD),
            },
            allowed_origins: vec![],
            sentry_dsn: None,
            sentry_environment: None,
        };

        let state = AppState::new(config)
            .await
            .expect("failed to build application state");
        let app = Router::new().merge(routes::routes()).with_state(state);

        Self { app, data_dir }
    }

    /// Send one request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Log in with the test credentials and return the `name=value` cookie
    /// pair to attach to subsequent requests.
    pub async fn login(&self) -> String {
        let response = self
            .send(post_json(
                "/api/auth/login",
                &serde_json::json!({
                    "username": ADMIN_USERNAME,
                    "password": ADMIN_PASSWORD,
                }),
                None,
            ))
            .await;
        assert_eq!(response.status(), StatusCode::OK, "login must succeed");

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login sets a session cookie")
            .to_str()
            .expect("cookie is valid ASCII");

        set_cookie
            .split(';')
            .next()
            .expect("cookie has a name=value pair")
            .to_string()
    }

    /// Path of a collection document inside the scratch data directory.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.data_dir.path().join(format!("{name}.json"))
    }
}

/// Build a GET request, optionally authenticated.
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    build(Method::GET, uri, cookie, None)
}

/// Build a POST request with a JSON body, optionally authenticated.
pub fn post_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    build(Method::POST, uri, cookie, Some(body))
}

/// Build a PUT request with a JSON body, optionally authenticated.
pub fn put_json(uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    build(Method::PUT, uri, cookie, Some(body))
}

/// Build a DELETE request, optionally authenticated.
pub fn delete(uri: &str, cookie: Option<&str>) -> Request<Body> {
    build(Method::DELETE, uri, cookie, None)
}

fn build(method: Method, uri: &str, cookie: Option<&str>, body: Option<&Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string())),
        None => builder.body(Body::empty()),
    };
    request.expect("request is well-formed")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body is readable");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
