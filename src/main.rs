//! Shelf Server - Library Lending API

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelf_server::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::storage::JsonFileStorage,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config.logging);

    tracing::info!("Starting Shelf Server v{}", env!("CARGO_PKG_VERSION"));

    let storage = Arc::new(JsonFileStorage::new(
        &config.storage.books_path,
        &config.storage.students_path,
    ));

    tracing::info!(
        books = %config.storage.books_path,
        students = %config.storage.students_path,
        "Loading library state"
    );

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    let state = AppState::build(config, storage)
        .await
        .map_err(|e| anyhow!("Failed to load library state: {e}"))?;

    // Build router
    let app = api::create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().context("Invalid host address")?,
        server_port,
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow!("Server error: {e}"))?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("shelf_server={},tower_http=debug", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

// Graceful shutdown on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("Received Ctrl+C"); }
        () = terminate => { tracing::info!("Received SIGTERM"); }
    }

    tracing::info!("Shutdown signal received, closing server");
}
