//! Mint a session token from the command line.
//!
//! Useful for scripting against the protected endpoints without going
//! through the browser login:
//!
//! ```bash
//! TOKEN=$(atelier-cli token 2>/dev/null)
//! curl -H "Cookie: token=$TOKEN" -X DELETE localhost:4000/api/projects/3
//! ```
//!
//! # Environment Variables
//!
//! Uses the same configuration as the server: `JWT_SECRET`,
//! `JWT_EXPIRES_IN`, `ADMIN_USERNAME`, `ADMIN_PASSWORD`.

use atelier_core::Role;
use atelier_server::config::{ServerConfig, parse_duration};
use atelier_server::services::auth::TokenService;
use tracing::info;

/// Mint and print a session token.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the token cannot be
/// issued.
pub fn run(username: Option<&str>, expires_in: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    let ttl = match expires_in {
        Some(raw) => parse_duration(raw).map_err(|e| format!("invalid --expires-in: {e}"))?,
        None => config.session_ttl,
    };
    let username = username.unwrap_or(&config.admin.username);

    let tokens = TokenService::new(&config.jwt_secret, ttl)?;
    let (token, claims) = tokens.issue(username, Role::Admin)?;

    info!(
        "Issued session token for {} (expires at epoch {})",
        claims.sub, claims.exp
    );

    // The token itself goes to stdout so it can be captured by scripts.
    #[allow(clippy::print_stdout)]
    {
        println!("{token}");
    }

    Ok(())
}
