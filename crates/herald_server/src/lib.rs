//! Run orchestrator and HTTP API for Herald.
//!
//! [`RunOrchestrator`] executes one cycle: validate, generate once, publish to
//! every enabled platform concurrently. [`create_router`] exposes it as
//! `POST /api/agent/run`.

mod api;
mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod orchestrator;

pub use api::{ApiError, RUN_PATH, create_router};
pub use config::{DEFAULT_BIND, ServerConfig, ServerConfigBuilder};
#[cfg(feature = "metrics")]
pub use metrics::RunMetrics;
pub use orchestrator::RunOrchestrator;

use herald_error::{HeraldResult, HttpError};
use tracing::{info, instrument};

/// Serves the API until Ctrl-C.
#[instrument(skip_all, fields(bind = %config.bind()))]
pub async fn serve(config: &ServerConfig, orchestrator: RunOrchestrator) -> HeraldResult<()> {
    let listener = tokio::net::TcpListener::bind(config.bind())
        .await
        .map_err(|e| HttpError::new(format!("Failed to bind {}: {}", config.bind(), e)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| HttpError::new(format!("Failed to read local address: {}", e)))?;
    info!(%addr, "Herald API listening");

    axum::serve(listener, create_router(orchestrator))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .map_err(|e| HttpError::new(format!("Server error: {}", e)))?;
    Ok(())
}
