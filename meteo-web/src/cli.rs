use anyhow::Context;
use clap::Parser;
use meteo_core::{Config, WeatherPage, provider_from_config};
use std::{path::PathBuf, sync::Arc};
use tokio::net::TcpListener;

use crate::handler::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo-web", version, about = "Serves the daily forecast page")]
pub struct Cli {
    /// Config file; defaults to `config.toml` in the platform config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, overrides `server.bind_address`.
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to listen on, overrides `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(bind) = &self.bind {
            config.server.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        Ok(config)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;
        let provider = provider_from_config(&config)?;
        let state = Arc::new(AppState {
            pages: WeatherPage::new(provider),
        });

        let addr = format!("{}:{}", config.server.bind_address, config.server.port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        tracing::info!(%addr, "starting web server");
        axum::serve(listener, handler::router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Web server stopped unexpectedly")?;

        tracing::info!("web server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
