//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use hearth_shared::time::SystemClock;

use crate::{
    engine::Engine,
    handler::{debug_state, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Fatal startup and serve failures.
///
/// The process must not keep running partially initialized, so these
/// propagate straight out of [`run_server`] and the binary exits.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the relay's router over the given state.
///
/// Split out of [`run_server`] so tests can serve the same router on an
/// ephemeral port.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .route("/debug/state", get(debug_state))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the broadcast relay server
///
/// # Arguments
///
/// * `host` - The host address to bind to (e.g., "127.0.0.1")
/// * `port` - The port number to bind to (e.g., 3000)
pub async fn run_server(host: String, port: u16) -> Result<(), ServerError> {
    let state = Arc::new(AppState {
        engine: Engine::new(Arc::new(SystemClock)),
    });
    let router = app(state);

    let bind_addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;

    tracing::info!(
        "chat relay listening on {}",
        listener.local_addr().map_err(ServerError::Serve)?
    );
    tracing::info!("Connect to: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
