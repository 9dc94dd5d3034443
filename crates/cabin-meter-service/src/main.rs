//! Cabin Meter Service - HTTP API for cabin electricity usage
//!
//! This is the main entry point for the cabin-meter service.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cabin_meter_service::{create_router, AppState, ServiceConfig};
use cabin_meter_store::{seed_sample_data, SqliteStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cabin_meter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Cabin Meter Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        database_path = %config.database_path,
        db_max_connections = config.db_max_connections,
        seed_sample_data = config.seed_sample_data,
        "Service configuration loaded"
    );

    // Open the SQLite store, creating the parent directory if needed
    if let Some(parent) = Path::new(&config.database_path).parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    tracing::info!(path = %config.database_path, "Opening SQLite store");
    let store = SqliteStore::open_with(&config.database_path, config.db_max_connections).await?;

    if config.seed_sample_data && seed_sample_data(&store).await? {
        tracing::info!("Empty database populated with sample data");
    }

    // Build app state
    let state = AppState::new(Arc::new(store), config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
