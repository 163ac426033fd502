use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

use retroboard_core::types::{BoardId, Timestamp, UserId};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct BoardConnection {
    /// The board this connection is viewing.
    pub board_id: BoardId,
    /// Authenticated user behind the connection.
    pub user_id: UserId,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
    /// When this connection was established.
    pub connected_at: Timestamp,
}

/// Manages all active WebSocket connections, keyed by connection ID and
/// scoped to boards for broadcast.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct BoardWsManager {
    connections: RwLock<HashMap<String, BoardConnection>>,
}

impl BoardWsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection on a board.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(
        &self,
        conn_id: String,
        board_id: BoardId,
        user_id: UserId,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = BoardConnection {
            board_id,
            user_id,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Send a message to one connection. Returns `false` if the connection
    /// is unknown or its channel has closed.
    pub async fn send_to(&self, conn_id: &str, message: Message) -> bool {
        let conns = self.connections.read().await;
        match conns.get(conn_id) {
            Some(conn) => conn.sender.send(message).is_ok(),
            None => false,
        }
    }

    /// Broadcast a message to every connection on a board.
    ///
    /// Connections whose send channels are closed are silently skipped
    /// (they will be cleaned up on their next receive loop iteration).
    pub async fn broadcast_to_board(&self, board_id: BoardId, message: Message) {
        let conns = self.connections.read().await;
        for conn in conns.values().filter(|c| c.board_id == board_id) {
            let _ = conn.sender.send(message.clone());
        }
    }

    /// Send a message to a board's connections, skipping those that belong
    /// to `user_id`. Used by event fan-out: the acting user already received
    /// the direct reply.
    ///
    /// Returns the number of connections the message was sent to.
    pub async fn send_to_board_except_user(
        &self,
        board_id: BoardId,
        user_id: UserId,
        message: Message,
    ) -> usize {
        let conns = self.connections.read().await;
        let mut count = 0;
        for conn in conns
            .values()
            .filter(|c| c.board_id == board_id && c.user_id != user_id)
        {
            if conn.sender.send(message.clone()).is_ok() {
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

impl Default for BoardWsManager {
    fn default() -> Self {
        Self::new()
    }
}
