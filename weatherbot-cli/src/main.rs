//! Binary crate for the `weatherbot` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Loading `.env` and setting up logging
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();

    let cmd = cli::Cli::parse();
    init_logging(cmd.verbose);

    if let Ok(path) = dotenv {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    cmd.run().await
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "weatherbot=debug,weatherbot_core=debug"
    } else {
        "weatherbot=info,weatherbot_core=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
