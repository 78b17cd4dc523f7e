use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use common::ClientConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;
mod render;
mod terminal;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing; stdout is reserved for rendered views
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(api_url) = &cli.api_url {
        config = config.with_api_url(api_url)?;
    }

    info!("Starting moviedeck against {}", config.api_url);

    commands::run(cli.command, config).await
}
