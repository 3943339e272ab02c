//! # Taskboard Server
//!
//! Standalone binary serving the task REST API.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin taskboard-server
//!
//! # Run with specific environment
//! TASKBOARD_ENV=production cargo run --bin taskboard-server
//! ```

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info};

use taskboard_core::config::ConfigManager;
use taskboard_core::database::{DatabaseConnection, PgTaskStore};
use taskboard_core::logging;
use taskboard_core::web::{create_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_structured_logging();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        build_mode = if cfg!(debug_assertions) { "debug" } else { "release" },
        "Starting Taskboard server"
    );

    let manager = ConfigManager::load().context("Failed to load configuration")?;
    let config = manager.config();

    let connection = DatabaseConnection::connect(config)
        .await
        .context("Failed to connect to database")?;

    if config.database.run_migrations {
        connection
            .run_migrations()
            .await
            .context("Failed to run database migrations")?;
    }

    let store = Arc::new(PgTaskStore::new(connection.pool().clone()));
    let state = AppState::from_config(&manager, store).context("Failed to build web state")?;
    let app = create_app(state);

    let listener = TcpListener::bind(&config.web.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.web.bind_address))?;

    info!(
        bind_address = %config.web.bind_address,
        environment = %manager.environment(),
        "Taskboard server listening; press Ctrl+C to shut down"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Closing database pool");
    connection.close().await;
    info!("Taskboard server shutdown complete");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
