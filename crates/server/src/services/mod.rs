//! Service layer for the portfolio API.

pub mod auth;

pub use auth::{AuthError, TokenService};
