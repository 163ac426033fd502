//! Relational [`LockStore`] backend.
//!
//! Adapts [`DragLockRepo`] to the store contract. Expiry here is
//! timestamp-based: reads filter lapsed rows, writes evict them inline, and
//! the background reaper sweeps whatever neither touched.

use async_trait::async_trait;
use chrono::Duration;

use retroboard_core::draglock::store::{LockStore, LockStoreError};
use retroboard_core::draglock::{CreateDragLock, DragLock};
use retroboard_core::types::{BoardId, NoteId};

use crate::repositories::DragLockRepo;
use crate::DbPool;

pub struct PgLockStore {
    pool: DbPool,
}

impl PgLockStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LockStore for PgLockStore {
    async fn create_if_absent(
        &self,
        claim: &CreateDragLock,
        ttl: Duration,
    ) -> Result<bool, LockStoreError> {
        DragLockRepo::try_insert(
            &self.pool,
            claim.note_id,
            claim.user_id,
            claim.board_id,
            ttl.num_seconds(),
        )
        .await
        .map_err(into_store_error)
    }

    async fn get(&self, note_id: NoteId) -> Result<Option<DragLock>, LockStoreError> {
        DragLockRepo::get_live(&self.pool, note_id)
            .await
            .map(|row| row.map(DragLock::from))
            .map_err(into_store_error)
    }

    async fn delete(&self, note_id: NoteId) -> Result<bool, LockStoreError> {
        DragLockRepo::delete(&self.pool, note_id)
            .await
            .map_err(into_store_error)
    }

    async fn refresh(&self, note_id: NoteId, ttl: Duration) -> Result<bool, LockStoreError> {
        DragLockRepo::refresh(&self.pool, note_id, ttl.num_seconds())
            .await
            .map_err(into_store_error)
    }

    async fn list_for_board(&self, board_id: BoardId) -> Result<Vec<DragLock>, LockStoreError> {
        DragLockRepo::list_for_board(&self.pool, board_id)
            .await
            .map(|rows| rows.into_iter().map(DragLock::from).collect())
            .map_err(into_store_error)
    }
}

fn into_store_error(err: sqlx::Error) -> LockStoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            LockStoreError::Malformed(err.to_string())
        }
        other => LockStoreError::Unavailable(other.to_string()),
    }
}
