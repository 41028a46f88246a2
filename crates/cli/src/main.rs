//! kinrelay CLI — the main entry point.
//!
//! Commands:
//! - `ask`     — Send a single message
//! - `relay`   — Send a JSON conversation transcript
//! - `init`    — Write a starter config file
//! - `doctor`  — Check configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "kinrelay",
    about = "kinrelay — relay conversations to the Kindroid inference API",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Ask {
        /// Share code of the target persona
        #[arg(short, long, env = "KINDROID_SHARE_CODE")]
        share_code: String,

        /// Name to speak as
        #[arg(short, long, default_value = "user")]
        username: String,

        /// Ask the service to filter its output
        #[arg(short, long)]
        filter: bool,

        /// The message text
        message: String,
    },

    /// Send a conversation transcript (`[{"username": .., "text": ..}]`)
    Relay {
        /// Share code of the target persona
        #[arg(short, long, env = "KINDROID_SHARE_CODE")]
        share_code: String,

        /// Ask the service to filter its output
        #[arg(short, long)]
        filter: bool,

        /// Path to the JSON transcript
        transcript: PathBuf,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check configuration
    Doctor,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Ask {
            share_code,
            username,
            filter,
            message,
        } => commands::ask::run(&share_code, &username, &message, filter).await?,
        Commands::Relay {
            share_code,
            filter,
            transcript,
        } => commands::relay::run(&share_code, &transcript, filter).await?,
        Commands::Init { force } => commands::init::run(force)?,
        Commands::Doctor => commands::doctor::run()?,
    }

    Ok(())
}
