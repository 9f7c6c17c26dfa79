// Main entry point for the RSVP server

use std::sync::Arc;

use anyhow::{Context, Result};
use rsvp_core::domains::rsvp::store::ResponseStore;
use rsvp_core::{server::build_app, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,rsvp_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Yahavi AGM RSVP service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Open the response store; the snapshot load happens here
    let store = Arc::new(ResponseStore::open(&config.data_dir, config.mirror_url.clone()).await);

    // Build application
    let app = build_app(store, &config);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("RSVP form: http://localhost:{}/", config.port);
    tracing::info!("Admin panel: http://localhost:{}/admin", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
