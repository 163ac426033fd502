//! Board event fan-out.
//!
//! [`BoardEventRouter`] subscribes to the event bus and pushes each published
//! board event to that board's WebSocket connections. Connections of the
//! acting user are skipped: the actor already got the direct reply on the
//! connection that performed the operation.

use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::broadcast;

use retroboard_events::BoardMessage;

use crate::ws::BoardWsManager;

/// Routes board events to WebSocket subscribers.
pub struct BoardEventRouter {
    ws_manager: Arc<BoardWsManager>,
}

impl BoardEventRouter {
    pub fn new(ws_manager: Arc<BoardWsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the main routing loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each message.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](retroboard_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<BoardMessage>) {
        loop {
            match receiver.recv().await {
                Ok(message) => self.route(message).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Board event router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, board event router shutting down");
                    break;
                }
            }
        }
    }

    /// Push one event to the board's other viewers.
    async fn route(&self, message: BoardMessage) {
        let json = match serde_json::to_string(&message.event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode board event");
                return;
            }
        };

        let sent = self
            .ws_manager
            .send_to_board_except_user(
                message.board_id,
                message.event.user_id(),
                Message::Text(json.into()),
            )
            .await;

        tracing::debug!(
            board_id = %message.board_id,
            note_id = %message.event.note_id(),
            sent,
            "Board event fanned out"
        );
    }
}
