//! In-memory lock store with native per-key TTL.
//!
//! Suitable for single-process deployments and tests. Expiry is implicit:
//! every operation treats a lapsed lease as absent, and lapsed entries are
//! evicted on the next write that touches their key -- no reaper needed.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;

use crate::draglock::store::{LockStore, LockStoreError};
use crate::draglock::{CreateDragLock, DragLock};
use crate::types::{BoardId, NoteId};

/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct MemoryLockStore {
    leases: RwLock<HashMap<NoteId, DragLock>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self {
            leases: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryLockStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LockStore for MemoryLockStore {
    async fn create_if_absent(
        &self,
        claim: &CreateDragLock,
        ttl: Duration,
    ) -> Result<bool, LockStoreError> {
        let now = Utc::now();
        let mut leases = self.leases.write().await;

        // Check-and-insert under one write guard: racing claims on the same
        // note are totally ordered here.
        if let Some(existing) = leases.get(&claim.note_id) {
            if !existing.is_expired(now) {
                return Ok(false);
            }
        }

        leases.insert(
            claim.note_id,
            DragLock {
                note_id: claim.note_id,
                user_id: claim.user_id,
                board_id: claim.board_id,
                acquired_at: now,
                expires_at: now + ttl,
            },
        );
        Ok(true)
    }

    async fn get(&self, note_id: NoteId) -> Result<Option<DragLock>, LockStoreError> {
        let now = Utc::now();
        let leases = self.leases.read().await;
        Ok(leases
            .get(&note_id)
            .filter(|lock| !lock.is_expired(now))
            .cloned())
    }

    async fn delete(&self, note_id: NoteId) -> Result<bool, LockStoreError> {
        Ok(self.leases.write().await.remove(&note_id).is_some())
    }

    async fn refresh(&self, note_id: NoteId, ttl: Duration) -> Result<bool, LockStoreError> {
        let now = Utc::now();
        let mut leases = self.leases.write().await;

        match leases.get(&note_id).map(|lock| lock.is_expired(now)) {
            Some(false) => {
                if let Some(lock) = leases.get_mut(&note_id) {
                    lock.expires_at = now + ttl;
                }
                Ok(true)
            }
            Some(true) => {
                // Lapsed lease: evict rather than resurrect under a stale owner.
                leases.remove(&note_id);
                Ok(false)
            }
            None => Ok(false),
        }
    }

    async fn list_for_board(&self, board_id: BoardId) -> Result<Vec<DragLock>, LockStoreError> {
        let now = Utc::now();
        let leases = self.leases.read().await;
        Ok(leases
            .values()
            .filter(|lock| lock.board_id == board_id && !lock.is_expired(now))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
