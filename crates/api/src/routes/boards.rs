//! Route definitions for board realtime state.
//!
//! ```text
//! GET /{board_id}/ws                  -> board_ws_handler
//! GET /{board_id}/locks               -> list_locks
//! GET /{board_id}/locks/{note_id}     -> get_lock
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::board_locks;
use crate::state::AppState;
use crate::ws;

/// Board routes mounted at `/boards`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{board_id}/ws", get(ws::board_ws_handler))
        .route("/{board_id}/locks", get(board_locks::list_locks))
        .route("/{board_id}/locks/{note_id}", get(board_locks::get_lock))
}
