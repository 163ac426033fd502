//! Handlers for drag-lock state queries.
//!
//! Clients use the bulk endpoint to reconcile lock state after a reconnect,
//! and the single-note endpoint to show who is dragging.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use retroboard_core::error::CoreError;
use retroboard_core::types::{BoardId, NoteId};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/boards/{board_id}/locks
///
/// All live drag locks on a board.
pub async fn list_locks(
    State(state): State<AppState>,
    Path(board_id): Path<BoardId>,
) -> AppResult<impl IntoResponse> {
    let locks = state.coordinator.locks_for_board(board_id).await;
    Ok(Json(DataResponse { data: locks }))
}

/// GET /api/v1/boards/{board_id}/locks/{note_id}
///
/// The live drag lock on a single note. Returns 404 if the note is not
/// currently being dragged.
pub async fn get_lock(
    State(state): State<AppState>,
    Path((_board_id, note_id)): Path<(BoardId, NoteId)>,
) -> AppResult<impl IntoResponse> {
    let lock = state
        .coordinator
        .get_lock(note_id)
        .await
        .ok_or(CoreError::NotFound {
            entity: "drag_lock",
            id: note_id,
        })?;
    Ok(Json(DataResponse { data: lock }))
}
