//! slircbot - Straylight IRC Bot
//!
//! A single-connection IRC bot that takes commands from channel operators.

mod commands;
mod config;
mod error;
mod handlers;
mod network;
mod quotes;
mod state;
mod telemetry;

use crate::config::Config;
use crate::network::Client;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        nick = %config.identity.nick,
        channels = config.bot.channels.len(),
        "Starting slircbot"
    );

    let client = Client::new(config);
    client.run().await.map_err(|e| {
        error!(error = %e, "Bot stopped");
        e
    })?;

    info!("Shutdown complete");
    Ok(())
}
