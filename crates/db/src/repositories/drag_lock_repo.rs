//! Repository for the `drag_locks` table.
//!
//! Rows carry explicit expiry timestamps. A row whose lease has lapsed must
//! read as absent everywhere, even while it physically persists until the
//! next inline cleanup or reaper sweep.

use sqlx::PgPool;

use retroboard_core::types::{BoardId, NoteId, UserId};

use crate::models::drag_lock::DragLockRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "note_id, user_id, board_id, acquired_at, expires_at";

/// Lease storage operations for drag locks.
pub struct DragLockRepo;

impl DragLockRepo {
    /// Attempt to claim a note for `ttl_secs` seconds.
    ///
    /// Evicts a lapsed lease for the key first, then relies on
    /// `INSERT ... ON CONFLICT DO NOTHING` against the primary key: of two
    /// processes racing on the same note, exactly one insert lands. Returns
    /// `true` if this call created the lease.
    pub async fn try_insert(
        pool: &PgPool,
        note_id: NoteId,
        user_id: UserId,
        board_id: BoardId,
        ttl_secs: i64,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query("DELETE FROM drag_locks WHERE note_id = $1 AND expires_at <= NOW()")
            .bind(note_id)
            .execute(pool)
            .await?;

        let result = sqlx::query(
            "INSERT INTO drag_locks (note_id, user_id, board_id, expires_at) \
             VALUES ($1, $2, $3, NOW() + ($4 || ' seconds')::interval) \
             ON CONFLICT (note_id) DO NOTHING",
        )
        .bind(note_id)
        .bind(user_id)
        .bind(board_id)
        .bind(ttl_secs.to_string())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The live lease for a note, or `None` if absent or lapsed.
    pub async fn get_live(
        pool: &PgPool,
        note_id: NoteId,
    ) -> Result<Option<DragLockRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM drag_locks WHERE note_id = $1 AND expires_at > NOW()");
        sqlx::query_as::<_, DragLockRow>(&query)
            .bind(note_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the lease for a note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, note_id: NoteId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drag_locks WHERE note_id = $1")
            .bind(note_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Push out the expiry of a live lease. Returns `true` if a live row was
    /// updated; lapsed rows are left for cleanup rather than resurrected.
    pub async fn refresh(
        pool: &PgPool,
        note_id: NoteId,
        ttl_secs: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE drag_locks SET expires_at = NOW() + ($2 || ' seconds')::interval \
             WHERE note_id = $1 AND expires_at > NOW()",
        )
        .bind(note_id)
        .bind(ttl_secs.to_string())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All live leases on a board, oldest first.
    ///
    /// Runs the board-scoped cleanup first so expiry is visible immediately
    /// rather than only after the next reaper sweep.
    pub async fn list_for_board(
        pool: &PgPool,
        board_id: BoardId,
    ) -> Result<Vec<DragLockRow>, sqlx::Error> {
        sqlx::query("DELETE FROM drag_locks WHERE board_id = $1 AND expires_at <= NOW()")
            .bind(board_id)
            .execute(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM drag_locks WHERE board_id = $1 ORDER BY acquired_at, note_id"
        );
        sqlx::query_as::<_, DragLockRow>(&query)
            .bind(board_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every lapsed lease. Returns the count of deleted rows.
    /// Called by the background reaper.
    pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM drag_locks WHERE expires_at <= NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
