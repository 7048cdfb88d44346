//! QuantumLink Server - REST API for quantum message packaging
//!
//! Exposes quantumlink-core functionality via HTTP endpoints:
//! - POST /api/v1/encode - Encode a message into a package
//! - POST /api/v1/decode - Decode a package from measurements
//! - GET /api/v1/packages - List the caller's packages
//! - GET /api/v1/packages/{package_id} - Package detail

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use quantumlink_server::{create_router_with_state, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,quantumlink_server=debug")),
        )
        .init();

    let config = Config::from_env();
    let state = AppState::from_config(&config);
    let app = create_router_with_state(&config, state);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("QuantumLink API listening on http://{}", addr);
    tracing::info!("API docs available at http://{}/docs", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received, draining connections");
}
