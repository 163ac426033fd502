use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;

use retroboard_core::draglock::protocol::{actions, DragLockRequest, DragLockResponse};
use retroboard_core::draglock::LockCoordinator;
use retroboard_core::types::{BoardId, UserId};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Query parameters accepted by the board WebSocket upgrade.
///
/// The user id is established by the session/auth layer in front of this
/// service and forwarded here.
#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub user_id: Option<UserId>,
}

/// HTTP handler that upgrades a board connection to WebSocket.
///
/// GET /api/v1/boards/{board_id}/ws?user_id=<uuid>
pub async fn board_ws_handler(
    Path(board_id): Path<BoardId>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let user_id = params
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id query parameter is required".into()))?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, board_id, user_id)))
}

/// Manage a single board connection after upgrade.
///
/// Splits the socket into a sink (outbound) and stream (inbound), then:
///   1. Registers the connection with `BoardWsManager`.
///   2. Spawns a sender task that forwards messages from the manager channel.
///   3. Dispatches inbound drag-lock frames on the current task.
///   4. On disconnect, releases every lease the user still holds on the board.
async fn handle_socket(socket: WebSocket, state: AppState, board_id: BoardId, user_id: UserId) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, board_id = %board_id, user_id = %user_id, "WebSocket connected");

    // Register and get the receiver for outbound messages.
    let mut rx = state.ws_manager.add(conn_id.clone(), board_id, user_id).await;

    let (mut sink, mut stream) = socket.split();

    // Sender task: forward channel messages to the WebSocket sink.
    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sink.send(msg).await.is_err() {
                tracing::debug!(conn_id = %sender_conn_id, "WebSocket sink closed");
                break;
            }
        }
    });

    // Receiver loop: dispatch inbound frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = dispatch(&state.coordinator, board_id, user_id, &text).await;
                match serde_json::to_string(&reply) {
                    Ok(json) => {
                        // The direct reply goes only to the requester; board
                        // broadcast runs separately via the event bus.
                        state
                            .ws_manager
                            .send_to(&conn_id, Message::Text(json.into()))
                            .await;
                    }
                    Err(e) => {
                        tracing::error!(conn_id = %conn_id, error = %e, "Failed to encode reply");
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => {
                tracing::trace!(conn_id = %conn_id, "Pong received");
            }
            Ok(_) => {
                // Binary and Ping frames carry nothing in this protocol.
            }
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "WebSocket receive error");
                break;
            }
        }
    }

    // Clean up: remove connection, stop the sender, drop the user's leases.
    state.ws_manager.remove(&conn_id).await;
    send_task.abort();

    let released = state.coordinator.release_user_locks(board_id, user_id).await;
    tracing::info!(conn_id = %conn_id, board_id = %board_id, released, "WebSocket disconnected");
}

/// Decode one inbound frame, run the lock operation, and build the direct
/// reply. Pure over the coordinator, so the protocol is testable without a
/// socket.
pub async fn dispatch(
    coordinator: &LockCoordinator,
    board_id: BoardId,
    user_id: UserId,
    text: &str,
) -> DragLockResponse {
    let request = match DragLockRequest::parse(text) {
        Ok(request) => request,
        Err(e) => {
            tracing::debug!(error = %e, "Malformed drag-lock frame");
            return DragLockResponse::denied(actions::ERROR, None, "Invalid message format");
        }
    };

    match request.action.as_str() {
        actions::ACQUIRE => {
            if coordinator
                .acquire_lock(request.note_id, user_id, board_id)
                .await
            {
                DragLockResponse::granted(actions::ACQUIRE, request.note_id)
            } else {
                DragLockResponse::denied(
                    actions::ACQUIRE,
                    Some(request.note_id),
                    "Failed to acquire lock",
                )
            }
        }
        actions::RELEASE => {
            if coordinator
                .release_lock(request.note_id, user_id, board_id)
                .await
            {
                DragLockResponse::granted(actions::RELEASE, request.note_id)
            } else {
                DragLockResponse::denied(
                    actions::RELEASE,
                    Some(request.note_id),
                    "Failed to release lock",
                )
            }
        }
        other => DragLockResponse::denied(other, Some(request.note_id), "Unknown action"),
    }
}
