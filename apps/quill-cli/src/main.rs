//! # Quill
//!
//! Command-line front end for the Quill post store.

use clap::Parser;

mod args;
mod config;
mod handlers;
mod print;
mod state;
mod telemetry;

use args::Cli;
use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env().with_overrides(cli.storage, cli.data_dir);
    tracing::debug!(?config, "Configuration loaded");

    let mut state = AppState::new(config).await?;

    let mut stdout = std::io::stdout().lock();
    handlers::run(&mut state, cli.command, &mut stdout).await
}
