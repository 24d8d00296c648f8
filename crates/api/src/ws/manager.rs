use std::collections::{HashMap, HashSet};

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};
use waypost_core::types::{DbId, Timestamp};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Authenticated user ID. Connections are only registered after the
    /// handshake has resolved a user, so this is never absent.
    pub user_id: DbId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
    /// Device command groups this connection has joined.
    pub devices: HashSet<DbId>,
}

/// Manages all active WebSocket connections and their group memberships.
///
/// Two group kinds exist: the implicit per-user group every connection
/// belongs to (keyed by `user_id`), and explicit per-device command
/// groups a connection joins and leaves on request. Group membership is
/// connection-local state; nothing survives a disconnect.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc`,
/// constructed once at startup, and shared through `AppState`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new authenticated connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
            devices: HashSet::new(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID, dropping all its group memberships.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Join a device's command group.
    pub async fn join_device(&self, conn_id: &str, device_id: DbId) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.devices.insert(device_id);
        }
    }

    /// Leave a device's command group. Leaving a group the connection
    /// never joined is a no-op.
    pub async fn leave_device(&self, conn_id: &str, device_id: DbId) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.devices.remove(&device_id);
        }
    }

    /// Send a message to a single connection.
    pub async fn send_to_conn(&self, conn_id: &str, message: Message) {
        if let Some(conn) = self.connections.read().await.get(conn_id) {
            let _ = conn.sender.send(message);
        }
    }

    /// Send a message to all connections belonging to a specific user.
    ///
    /// The target set is a snapshot of the membership at call time;
    /// connections joining or leaving concurrently are unaffected. Zero
    /// members is a no-op. Returns the number of connections the message
    /// was sent to.
    pub async fn send_to_user(&self, user_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.user_id == user_id {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Send a message to every connection in a device's command group.
    ///
    /// Same snapshot and zero-member semantics as [`send_to_user`].
    ///
    /// [`send_to_user`]: WsManager::send_to_user
    pub async fn send_to_device(&self, device_id: DbId, message: Message) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns.values() {
            if conn.devices.contains(&device_id) {
                let _ = conn.sender.send(message.clone());
                count += 1;
            }
        }
        count
    }

    /// Return the current number of active connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Send a Close frame to every connection, then clear the map.
    ///
    /// Used during graceful shutdown to notify all clients before the
    /// server stops accepting new connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all WebSocket connections");
    }

    /// Send a Ping frame to every connected client.
    ///
    /// Used by the heartbeat task to keep connections alive and detect
    /// stale ones.
    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
