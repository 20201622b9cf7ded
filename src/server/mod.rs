// src/server/mod.rs
// HTTP server lifecycle

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::db;
use crate::state::AppState;

/// Connect, bootstrap the schema, and serve until SIGTERM or Ctrl+C
pub async fn run(config: AppConfig) -> Result<()> {
    info!("Starting taskquip");
    info!("Gemini: {:?}", config.gemini);

    let pool = db::create_pool(&config.database_url).await?;
    db::ensure_schema(&pool).await?;

    let bind_address = config.server.bind_address();
    let state = AppState::new(pool.clone(), config)?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    info!("Listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}
