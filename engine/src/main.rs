// Diya chat service
// Main entry point for the diya binary

use clap::Parser;
use diya_engine::cli::{Cli, Command};
use diya_engine::config::Config;
use diya_engine::handlers::{handle_headers, handle_serve};
use diya_engine::telemetry::{init_telemetry, init_telemetry_with_level};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up OPENAI_API_KEY and friends from a .env file if present
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize basic telemetry first (before config is loaded)
    init_telemetry();

    tracing::info!("Diya v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration (or use custom path if provided)
    let config = if let Some(config_path) = &cli.config {
        Config::load_from_path(config_path)?
    } else {
        Config::load_or_create()?
    };

    // Re-initialize telemetry with config-driven log level
    // (only takes effect if RUST_LOG env var is not set)
    init_telemetry_with_level(&config.core.log_level);

    match cli.command {
        Command::Serve => {
            tracing::info!("Starting chat server...");
            handle_serve(&config).await
        }

        Command::Headers { dir } => handle_headers(dir, &config),
    }
}
