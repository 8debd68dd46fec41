//! HTTP route handlers for the portfolio API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check (wired in main)
//! GET  /health/ready               - Readiness check (wired in main)
//!
//! # Auth
//! POST /api/auth/login             - Mint a session cookie
//! POST /api/auth/logout            - Clear the session cookie
//!
//! # Projects (reads public, writes require a session)
//! GET    /api/projects             - Full list in display order
//! POST   /api/projects             - Create (201)
//! GET    /api/projects/{id}        - Single project
//! PUT    /api/projects/{id}        - Partial update
//! DELETE /api/projects/{id}        - Remove, returns the removed entity
//!
//! # Testimonials (same shape)
//! GET    /api/testimonials
//! POST   /api/testimonials
//! GET    /api/testimonials/{id}
//! PUT    /api/testimonials/{id}
//! DELETE /api/testimonials/{id}
//! ```

pub mod auth;
pub mod projects;
pub mod testimonials;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the project routes router.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::index).post(projects::create))
        .route(
            "/{id}",
            get(projects::show)
                .put(projects::update)
                .delete(projects::remove),
        )
}

/// Create the testimonial routes router.
pub fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(testimonials::index).post(testimonials::create))
        .route(
            "/{id}",
            get(testimonials::show)
                .put(testimonials::update)
                .delete(testimonials::remove),
        )
}

/// Create all routes for the API server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/projects", project_routes())
        .nest("/api/testimonials", testimonial_routes())
}
