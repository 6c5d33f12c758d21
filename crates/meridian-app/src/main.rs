//! Meridian application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize tracing
//! 3. Build the lead sink and shared API state
//! 4. Start the axum HTTP server

mod cli;

use std::sync::Arc;

use clap::Parser;
use meridian_api::AppState;
use meridian_core::{ConfigSource, MeridianConfig};
use meridian_leads::{LeadSink, LogSink};

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let config_file = args.resolve_config_path();
    let (mut config, config_source) = MeridianConfig::load_with_source(&config_file);

    // Tracing. RUST_LOG wins over the CLI flag and the config file.
    // Config outcomes are logged below, once the subscriber exists.
    let log_level = args
        .resolve_log_level()
        .unwrap_or_else(|| config.general.log_level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    tracing::info!("Starting Meridian v{}", env!("CARGO_PKG_VERSION"));
    match config_source {
        ConfigSource::File => {
            tracing::info!(path = %config_file.display(), "Configuration loaded");
        }
        ConfigSource::Missing => {
            tracing::info!(path = %config_file.display(), "No config file, using defaults");
        }
        ConfigSource::Invalid(e) => {
            tracing::warn!(
                path = %config_file.display(),
                error = %e,
                "Config file is invalid, using defaults"
            );
        }
    }

    config.server.port = args.resolve_port(config.server.port);
    config.server.host = args.resolve_host(&config.server.host);

    if !config.chat.enabled {
        tracing::warn!("Chat assistant disabled in config");
    }
    if config.server.allowed_origins.is_empty() {
        tracing::warn!("No CORS origins configured; browsers on other origins will be refused");
    }

    let sink: Arc<dyn LeadSink> = Arc::new(LogSink);
    tracing::info!(
        sink = sink.name(),
        white_papers = config.white_papers.len(),
        "Lead capture ready"
    );

    let state = AppState::new(config.clone(), sink);

    if let Err(e) = meridian_api::start_server(&config, state).await {
        tracing::error!(error = %e, "API server stopped");
        return Err(e.into());
    }

    Ok(())
}
