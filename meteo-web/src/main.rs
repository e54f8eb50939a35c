//! Binary crate for the `meteo-web` forecast page server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and logging setup
//! - Serving `/meteo` over HTTP
//! - Rendering the forecast into HTML

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod handler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
