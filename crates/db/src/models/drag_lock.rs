//! Drag lease row model.

use serde::Serialize;
use sqlx::FromRow;

use retroboard_core::draglock::DragLock;
use retroboard_core::types::{BoardId, NoteId, Timestamp, UserId};

/// A row from the `drag_locks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DragLockRow {
    pub note_id: NoteId,
    pub user_id: UserId,
    pub board_id: BoardId,
    pub acquired_at: Timestamp,
    pub expires_at: Timestamp,
}

impl From<DragLockRow> for DragLock {
    fn from(row: DragLockRow) -> Self {
        DragLock {
            note_id: row.note_id,
            user_id: row.user_id,
            board_id: row.board_id,
            acquired_at: row.acquired_at,
            expires_at: row.expires_at,
        }
    }
}
