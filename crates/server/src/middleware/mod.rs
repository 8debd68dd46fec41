//! Request middleware for the API server.

pub mod auth;

pub use auth::{RequireAdmin, SESSION_COOKIE};
