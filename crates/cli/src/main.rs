//! Keizok CLI - management tools for the dashboard's stored data.
//!
//! # Usage
//!
//! ```bash
//! # Store the sample posts for the demo user
//! keizok-cli seed
//!
//! # Print every stored array as JSON
//! keizok-cli export
//!
//! # Remove the EC site array
//! keizok-cli reset --key mock_ec_sites
//! ```
//!
//! All commands use `KEIZOK_DATABASE_URL` (or `DATABASE_URL`), like the
//! dashboard itself.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use keizok_dashboard::models::profile::DEMO_USER_ID;

mod commands;

#[derive(Parser)]
#[command(name = "keizok-cli")]
#[command(author, version, about = "Keizok CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the sample posts for a user who has none
    Seed {
        /// User ID that will own the posts
        #[arg(short, long, default_value = DEMO_USER_ID)]
        user: String,
    },
    /// Print stored arrays as JSON
    Export {
        /// Only export this key
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Delete stored arrays
    Reset {
        /// Only delete this key
        #[arg(short, long)]
        key: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Seed { user } => commands::seed::samples(&user).await,
        Commands::Export { key } => commands::export::keys(key.as_deref()).await,
        Commands::Reset { key } => commands::reset::keys(key.as_deref()).await,
    }
}
