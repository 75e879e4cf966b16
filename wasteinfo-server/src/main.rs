//! HTTP server that finds waste disposal and recycling facilities near a location.

mod app;
mod config;
mod error;
mod handlers;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wasteinfo_core::WasteInfoService;
use wasteinfo_provider_google as google;

use crate::app::{AppState, create_router};
use crate::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing, so env fallbacks see it)
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }

    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "wasteinfo=debug"
    } else {
        "wasteinfo=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // HTTP + service setup
    let client = Client::builder().user_agent("wasteinfo/0.1").build()?;
    let providers = google::providers(client, cli.google_config());
    let service = Arc::new(WasteInfoService::new(providers));
    tracing::debug!(provider = service.provider_name(), "lookup service ready");
    let app = create_router(AppState::new(service));

    let addr = cli.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Starting server at http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(%err, "failed to listen for shutdown signal");
    }
}
