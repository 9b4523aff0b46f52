//! Market Pulse - Live Indian Market Dashboard
//!
//! Shows five days of hourly prices for a chosen Indian index next to a
//! sentiment gauge computed from current market headlines.

pub mod cache;
pub mod config;
pub mod error;
pub mod indices;
pub mod providers;
pub mod pulse;
pub mod sentiment;
pub mod services;
pub mod state;
pub mod web;

use config::DashboardConfig;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use web::DashboardServer;

/// Initialize logging, start the dashboard server and serve until Ctrl-C
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_pulse_lib=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Market Pulse...");

    let config = DashboardConfig::from_env()?;
    let state = Arc::new(AppState::new(config)?);

    let mut server = DashboardServer::new(state);
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown requested");
    server.stop();

    Ok(())
}
