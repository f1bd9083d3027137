//! folio CLI — the main entry point.
//!
//! Commands:
//! - `serve`  — Start the HTTP server
//! - `doctor` — Report which integrations are configured

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "folio",
    about = "folio — portfolio backend with haiku, contact relay, and the Pai assistant",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = 8000)]
        port: u16,

        /// Directory holding journey.txt and resume.txt
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },

    /// Report which integrations are configured (no network calls)
    Doctor {
        /// Directory holding journey.txt and resume.txt
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => commands::serve::run(&host, port, data_dir).await?,
        Commands::Doctor { data_dir } => commands::doctor::run(&data_dir)?,
    }

    Ok(())
}
