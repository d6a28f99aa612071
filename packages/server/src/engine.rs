//! Broadcast & history engine.
//!
//! One engine instance is shared by every connection handler. It owns the
//! connection registry and the history buffer behind a single lock, so
//! registry enumeration and history mutation are never observed in a torn
//! state. Every send inside the critical section is a non-blocking channel
//! push; slow consumers queue in their own channel and a closed channel gets
//! the connection dropped instead of stalling the broadcast.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};

use hearth_shared::{
    protocol::{ClientEvent, ServerEvent},
    time::Clock,
};

use crate::{
    history::HistoryBuffer,
    registry::{ConnectionHandle, ConnectionId, Registry},
};

/// Display name fallback for a `join` without a usable name.
const FALLBACK_JOIN_NAME: &str = "Someone";
/// Display name fallback for a `message` without a usable name.
const FALLBACK_SENDER_NAME: &str = "Anonymous";

/// Shared state guarded by the engine's single lock.
struct RoomState {
    registry: Registry,
    history: HistoryBuffer,
}

/// Turns inbound event records into history mutations and fan-out
/// deliveries.
pub struct Engine {
    state: Mutex<RoomState>,
    clock: Arc<dyn Clock>,
}

impl Engine {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(RoomState {
                registry: Registry::new(),
                history: HistoryBuffer::new(),
            }),
            clock,
        }
    }

    /// Register a new connection and replay the current history to it.
    ///
    /// The `history` record is sent exactly once per connection, before any
    /// broadcast this connection can observe (both happen under the state
    /// lock).
    pub async fn connect(&self, sender: mpsc::UnboundedSender<String>) -> ConnectionId {
        let id = ConnectionId::new();
        let handle = ConnectionHandle::new(sender);

        let mut state = self.state.lock().await;
        state.registry.register(id, handle.clone());

        let replay = ServerEvent::History {
            data: state.history.snapshot(),
        };
        let payload = serde_json::to_string(&replay).unwrap();
        if !handle.send(payload) {
            tracing::warn!("connection {} closed before history replay", id);
        }

        tracing::info!("connection {} registered ({} active)", id, state.registry.len());
        id
    }

    /// Unregister a connection. Idempotent; no leave notice is synthesized
    /// (no display name is bound to the connection at this point).
    pub async fn disconnect(&self, id: ConnectionId) {
        let mut state = self.state.lock().await;
        if state.registry.unregister(&id) {
            tracing::info!("connection {} closed ({} active)", id, state.registry.len());
        }
    }

    /// Process one inbound frame from a connection.
    ///
    /// Malformed input and unrecognized record types are discarded without a
    /// reply; a logged warning is the only observable effect.
    pub async fn handle(&self, id: ConnectionId, raw: &str) {
        let event = match serde_json::from_str::<ClientEvent>(raw) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("discarding unusable record from connection {}: {}", id, e);
                return;
            }
        };

        match event {
            ClientEvent::Join { name } => {
                let record = ServerEvent::System {
                    text: format!(
                        "{} joined the chat",
                        normalize_name(name, FALLBACK_JOIN_NAME)
                    ),
                    time: self.clock.now_millis(),
                };
                self.commit(record).await;
            }
            ClientEvent::Message { name, text } => {
                let record = ServerEvent::Message {
                    name: normalize_name(name, FALLBACK_SENDER_NAME),
                    text: text.unwrap_or_default(),
                    time: self.clock.now_millis(),
                };
                self.commit(record).await;
            }
        }
    }

    /// Current connection count and stored history, for inspection.
    pub async fn snapshot(&self) -> (usize, Vec<ServerEvent>) {
        let state = self.state.lock().await;
        (state.registry.len(), state.history.snapshot())
    }

    /// Append a record to history and fan it out to every registered
    /// connection, sender included. A connection whose channel is no longer
    /// writable is skipped and unregistered before the lock is released.
    async fn commit(&self, record: ServerEvent) {
        let payload = serde_json::to_string(&record).unwrap();

        let mut state = self.state.lock().await;
        state.history.append(record);

        let mut dead = Vec::new();
        for (id, handle) in state.registry.snapshot() {
            if !handle.send(payload.clone()) {
                tracing::warn!("failed to deliver to connection {}, dropping it", id);
                dead.push(id);
            }
        }
        for id in dead {
            state.registry.unregister(&id);
        }
    }
}

/// A name is usable when present and non-empty; otherwise the fallback
/// applies. Whitespace-only names pass through unchanged.
fn normalize_name(name: Option<String>, fallback: &str) -> String {
    match name {
        Some(name) if !name.is_empty() => name,
        _ => fallback.to_string(),
    }
}
