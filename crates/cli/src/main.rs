//! Atelier CLI - Data seeding and session management tools.
//!
//! # Usage
//!
//! ```bash
//! # Initialize the data directory with starter content
//! atelier-cli seed
//!
//! # Initialize a specific data directory, overwriting existing documents
//! atelier-cli seed -d ./data --force
//!
//! # Mint a session token for scripting against a protected endpoint
//! atelier-cli token
//!
//! # Mint a short-lived token
//! atelier-cli token --expires-in 15m
//! ```
//!
//! # Commands
//!
//! - `seed` - Initialize the collection documents with starter content
//! - `token` - Mint a signed session token using the configured secret

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "atelier-cli")]
#[command(author, version, about = "Atelier CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory with starter content
    Seed {
        /// Data directory to seed (default: ATELIER_DATA_DIR or ./data)
        #[arg(short, long)]
        data_dir: Option<String>,

        /// Overwrite documents that already have content
        #[arg(long)]
        force: bool,
    },
    /// Mint a session token using the configured signing secret
    Token {
        /// Username embedded in the token (default: ADMIN_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Token lifetime, e.g. 45s, 30m, 12h, 7d (default: JWT_EXPIRES_IN)
        #[arg(short, long)]
        expires_in: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { data_dir, force } => {
            commands::seed::run(data_dir.as_deref(), force).await?;
        }
        Commands::Token {
            username,
            expires_in,
        } => {
            commands::token::run(username.as_deref(), expires_in.as_deref())?;
        }
    }
    Ok(())
}
