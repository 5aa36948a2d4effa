//! bologna-precip HTTP server entry point.
//!
//! Owns the lifecycle of the cache store and the upstream client, then serves
//! the routes until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use bologna_precip_client::OpenDataClient;
use bologna_precip_core::{AppConfig, open_store};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;
mod sweep;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = AppConfig::load()?;
    let store = open_store(&config).await?;
    let client = Arc::new(OpenDataClient::from_app_config(&config)?);

    let sweeper = sweep::spawn_expiry_sweep(store.clone(), sweep::SWEEP_INTERVAL);
    let app = routes::router(state::AppState::new(store, client.clone(), client));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %config.bind_addr,
        backend = ?config.cache_backend,
        version = env!("CARGO_PKG_VERSION"),
        "starting bologna-precip server"
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    sweeper.abort();

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
