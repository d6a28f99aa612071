//! Connection registry: the live set of broadcast targets.

use std::collections::HashMap;

use tokio::sync::mpsc;
use uuid::Uuid;

/// Opaque identifier for one active connection.
///
/// Assigned at registration and never reused; a client that reconnects gets
/// a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Write half of one client's channel.
///
/// Sends are queued and non-blocking; the receiving pump task drains the
/// queue into the WebSocket sink. A failed send means the pump is gone and
/// the connection is no longer writable.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    sender: mpsc::UnboundedSender<String>,
}

impl ConnectionHandle {
    pub fn new(sender: mpsc::UnboundedSender<String>) -> Self {
        Self { sender }
    }

    /// Deliver a serialized record to this connection. Returns `false` if
    /// the channel is closed.
    pub fn send(&self, payload: String) -> bool {
        self.sender.send(payload).is_ok()
    }
}

/// The set of connections eligible to receive broadcasts.
///
/// No ordering guarantee among connections; broadcast to each is
/// independent. The engine serializes all access behind its state lock.
#[derive(Debug, Default)]
pub struct Registry {
    connections: HashMap<ConnectionId, ConnectionHandle>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the active set. Always succeeds.
    pub fn register(&mut self, id: ConnectionId, handle: ConnectionHandle) {
        self.connections.insert(id, handle);
    }

    /// Remove a connection from the active set. Idempotent: removing an
    /// absent connection is a no-op. Returns whether it was present.
    pub fn unregister(&mut self, id: &ConnectionId) -> bool {
        self.connections.remove(id).is_some()
    }

    /// Point-in-time view of all registered connections for a broadcast
    /// pass. A connection that disconnects after the snapshot may still
    /// receive (and fail) one more send.
    pub fn snapshot(&self) -> Vec<(ConnectionId, ConnectionHandle)> {
        self.connections
            .iter()
            .map(|(id, handle)| (*id, handle.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
