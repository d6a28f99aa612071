//! WebSocket connection handlers and HTTP endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Serialize;
use tokio::sync::mpsc;

use hearth_shared::protocol::ServerEvent;

use crate::state::AppState;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound queue into the
/// WebSocket sink.
///
/// Broadcasts are queued by the engine as non-blocking channel pushes; this
/// pump is the only place that actually awaits socket writes, so one slow
/// client never stalls delivery to the others.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Registration also queues the one-shot history replay, so it reaches
    // the client ahead of anything broadcast afterwards.
    let (tx, rx) = mpsc::unbounded_channel();
    let conn_id = state.engine.connect(tx).await;

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on connection {}: {}", conn_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    state_clone.engine.handle(conn_id, &text).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("connection {} requested close", conn_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.engine.disconnect(conn_id).await;
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Response body of the debug endpoint.
#[derive(Debug, Serialize)]
pub struct DebugState {
    pub connections: usize,
    pub history: Vec<ServerEvent>,
}

/// Debug endpoint exposing the live connection count and stored history
/// (for inspection during development)
pub async fn debug_state(State(state): State<Arc<AppState>>) -> Json<DebugState> {
    let (connections, history) = state.engine.snapshot().await;
    Json(DebugState {
        connections,
        history,
    })
}
