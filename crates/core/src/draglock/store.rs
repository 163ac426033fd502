//! Storage contract for drag leases.
//!
//! Two conforming backends exist: [`MemoryLockStore`](super::MemoryLockStore)
//! with native per-key TTL, and the relational `PgLockStore` in the db crate
//! where expiry is timestamp-based and swept by the background reaper. All
//! coordination discipline lives at this seam -- the store is the only shared
//! mutable resource between server processes.

use async_trait::async_trait;
use chrono::Duration;

use crate::draglock::{CreateDragLock, DragLock};
use crate::types::{BoardId, NoteId};

/// Errors from a lock store backend.
///
/// These never escape the coordinator boundary; callers above it see boolean
/// results plus a log entry.
#[derive(Debug, thiserror::Error)]
pub enum LockStoreError {
    /// The backend could not be reached or the call timed out.
    #[error("Lock store unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but the record could not be decoded.
    #[error("Lock store returned malformed data: {0}")]
    Malformed(String),
}

/// Key-value lease storage with atomic conditional create.
#[async_trait]
pub trait LockStore: Send + Sync {
    /// Store `claim` as a live lease only if no live lease exists for the
    /// note. Returns `false` -- not an error -- when the key is already held.
    ///
    /// Must be atomic at the store level: two processes racing on the same
    /// note never both observe `true`.
    async fn create_if_absent(
        &self,
        claim: &CreateDragLock,
        ttl: Duration,
    ) -> Result<bool, LockStoreError>;

    /// Read the live lease for a note. Expired leases read as absent even if
    /// the backing record still physically exists.
    async fn get(&self, note_id: NoteId) -> Result<Option<DragLock>, LockStoreError>;

    /// Remove the lease for a note. Returns `true` if a record was removed;
    /// deleting an absent key is a harmless no-op.
    async fn delete(&self, note_id: NoteId) -> Result<bool, LockStoreError>;

    /// Push out the expiry of a live lease. Callers verify ownership first;
    /// the store does not re-check it. Returns `false` if no live lease
    /// exists for the note.
    async fn refresh(&self, note_id: NoteId, ttl: Duration) -> Result<bool, LockStoreError>;

    /// All live leases on a board.
    async fn list_for_board(&self, board_id: BoardId) -> Result<Vec<DragLock>, LockStoreError>;
}
