//! Drag-lock domain: lease records, the store contract and its in-memory
//! backend, the external collaborator seams, and the coordinator.
//!
//! This module lives in `core` (zero internal deps) so that the database
//! layer, the WebSocket handlers, and the event fan-out can all reference the
//! same lease semantics and message protocol.

pub mod broker;
pub mod coordinator;
pub mod memory;
pub mod protocol;
pub mod resolver;
pub mod store;

pub use broker::RealtimeBroker;
pub use coordinator::LockCoordinator;
pub use memory::MemoryLockStore;
pub use resolver::StackResolver;
pub use store::LockStore;

use serde::Serialize;

use crate::types::{BoardId, NoteId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Lease constants
// ---------------------------------------------------------------------------

/// Default lease TTL in seconds. A drag that is neither refreshed nor
/// released within this window self-heals via expiry.
pub const DEFAULT_LOCK_TTL_SECS: i64 = 30;

/// How often the expired-lease reaper sweeps (relational backend only).
pub const DEFAULT_REAPER_INTERVAL_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// DragLock
// ---------------------------------------------------------------------------

/// A lease held by one user on one note while they drag it.
///
/// Validity is purely temporal: the lease counts only while
/// `now < expires_at`, regardless of whether the backing record still
/// physically exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLock {
    pub note_id: NoteId,
    pub user_id: UserId,
    pub board_id: BoardId,
    pub acquired_at: Timestamp,
    pub expires_at: Timestamp,
}

impl DragLock {
    /// Whether the lease has lapsed at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Input for claiming a lease on a single note.
#[derive(Debug, Clone, Copy)]
pub struct CreateDragLock {
    pub note_id: NoteId,
    pub user_id: UserId,
    pub board_id: BoardId,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn lease_is_live_before_expiry() {
        let now = Utc::now();
        let lock = DragLock {
            note_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            board_id: uuid::Uuid::new_v4(),
            acquired_at: now,
            expires_at: now + Duration::seconds(DEFAULT_LOCK_TTL_SECS),
        };

        assert!(!lock.is_expired(now));
        assert!(!lock.is_expired(now + Duration::seconds(29)));
    }

    #[test]
    fn lease_expires_at_the_boundary() {
        let now = Utc::now();
        let lock = DragLock {
            note_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            board_id: uuid::Uuid::new_v4(),
            acquired_at: now,
            expires_at: now + Duration::seconds(30),
        };

        // `now < expires_at` is the validity condition, so the boundary
        // instant itself is already expired.
        assert!(lock.is_expired(now + Duration::seconds(30)));
        assert!(lock.is_expired(now + Duration::seconds(31)));
    }

    #[test]
    fn lock_serializes_camel_case() {
        let now = Utc::now();
        let lock = DragLock {
            note_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
            board_id: uuid::Uuid::new_v4(),
            acquired_at: now,
            expires_at: now,
        };

        let json = serde_json::to_value(&lock).unwrap();
        assert!(json.get("noteId").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("boardId").is_some());
        assert!(json.get("expiresAt").is_some());
    }
}
