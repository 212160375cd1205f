//! Serve command - Starts the HTTP server.
//!
//! The construction order is fixed: config (already loaded) -> store
//! connection -> migrations -> state and routes -> listener. Any failure
//! aborts startup; the listener never starts partially initialized.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{catalog, Database, Migrator};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    // Connect eagerly; an unreachable store aborts startup here.
    let db = Arc::new(Database::connect(&config).await?);
    tracing::info!("Database connected");

    // Bring the schema to the latest version before serving traffic.
    Migrator::new(catalog())?.apply(db.connection()).await?;

    // Build the component graph and route table.
    let app_state = AppState::new(db)?;
    let app = create_router(app_state);

    // Start server
    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve when ctrl-c is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
