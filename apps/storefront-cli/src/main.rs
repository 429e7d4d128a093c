//! # Storefront CLI
//!
//! Terminal client for the storefront backend: forum posts, comments and likes,
//! plus the admin product list.

use clap::Parser;

mod commands;
mod config;
mod console;
mod render;
mod state;
mod telemetry;

use commands::Cli;
use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present, before clap reads API_URL
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut telemetry = TelemetryConfig::from_env();
    telemetry.json_logs |= cli.json_logs;
    init_telemetry(&telemetry);

    let mut config = AppConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    tracing::debug!(
        api_url = %config.api_url,
        page_limit = config.page_limit,
        "Configuration loaded"
    );

    let state = AppState::new(&config)?;
    commands::run(cli.command, &state).await
}
