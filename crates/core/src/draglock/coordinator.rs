//! Lock coordinator: atomic multi-key acquire/release over a note's stack
//! group, on top of a [`LockStore`] backend.
//!
//! All failure recovery happens at this boundary. Store and resolver errors
//! are converted into boolean results plus a log entry; callers never see raw
//! backend errors. Contention is not an error -- it is the expected `false`.

use std::sync::Arc;

use chrono::Duration;

use crate::draglock::broker::RealtimeBroker;
use crate::draglock::protocol::BoardEvent;
use crate::draglock::resolver::StackResolver;
use crate::draglock::store::LockStore;
use crate::draglock::{CreateDragLock, DragLock, DEFAULT_LOCK_TTL_SECS};
use crate::types::{BoardId, NoteId, UserId};

/// Coordinates drag leases across a note stack.
///
/// Dependencies are constructor-injected; there is no global registry and no
/// context lookup. Wrap in `Arc` and share.
pub struct LockCoordinator {
    store: Arc<dyn LockStore>,
    resolver: Arc<dyn StackResolver>,
    broker: Arc<dyn RealtimeBroker>,
    ttl: Duration,
}

impl LockCoordinator {
    pub fn new(
        store: Arc<dyn LockStore>,
        resolver: Arc<dyn StackResolver>,
        broker: Arc<dyn RealtimeBroker>,
        ttl: Duration,
    ) -> Self {
        Self {
            store,
            resolver,
            broker,
            ttl,
        }
    }

    /// Coordinator with the default 30-second lease TTL.
    pub fn with_default_ttl(
        store: Arc<dyn LockStore>,
        resolver: Arc<dyn StackResolver>,
        broker: Arc<dyn RealtimeBroker>,
    ) -> Self {
        Self::new(
            store,
            resolver,
            broker,
            Duration::seconds(DEFAULT_LOCK_TTL_SECS),
        )
    }

    /// Attempt to lock the whole stack group of `note_id` for `user_id`.
    ///
    /// All-or-nothing: if any member is held by another user (or the store
    /// fails), every member locked by this call is rolled back and the
    /// acquire is denied. Members already held by `user_id` are refreshed
    /// rather than re-created, so a drag in progress can keep its lease
    /// alive by re-acquiring.
    ///
    /// Exactly one `NOTE_DRAG_START` is published per transition into the
    /// locked state; a pure refresh grants again without re-announcing.
    pub async fn acquire_lock(&self, note_id: NoteId, user_id: UserId, board_id: BoardId) -> bool {
        let stack = match self.resolver.stack_of(note_id).await {
            Ok(stack) => stack,
            Err(e) => {
                tracing::error!(note_id = %note_id, error = %e, "Stack resolution failed, denying acquire");
                return false;
            }
        };

        let mut created: Vec<NoteId> = Vec::new();
        for &member in &stack {
            let claim = CreateDragLock {
                note_id: member,
                user_id,
                board_id,
            };
            match self.store.create_if_absent(&claim, self.ttl).await {
                Ok(true) => created.push(member),
                Ok(false) => {
                    if !self.try_refresh_own(member, user_id).await {
                        self.rollback(&created).await;
                        return false;
                    }
                }
                Err(e) => {
                    tracing::error!(note_id = %member, error = %e, "Lock store failure during acquire");
                    self.rollback(&created).await;
                    return false;
                }
            }
        }

        // A grant where nothing was newly created is a refresh of an
        // existing drag; the board already heard about that one.
        if !created.is_empty() {
            self.publish(board_id, BoardEvent::NoteDragStart { note_id, user_id })
                .await;
        }
        true
    }

    /// Release the stack group of `note_id`, gated on ownership of the note
    /// the user originally grabbed.
    ///
    /// Sibling deletes that find nothing are harmless no-ops; only store
    /// failures fail the release. One `NOTE_DRAG_END` is published, and only
    /// when every member delete went through.
    pub async fn release_lock(&self, note_id: NoteId, user_id: UserId, board_id: BoardId) -> bool {
        let stack = match self.resolver.stack_of(note_id).await {
            Ok(stack) => stack,
            Err(e) => {
                tracing::error!(note_id = %note_id, error = %e, "Stack resolution failed, denying release");
                return false;
            }
        };

        match self.store.get(note_id).await {
            Ok(Some(held)) if held.user_id == user_id => {}
            Ok(_) => {
                // Absent, expired, or foreign-owned: a non-owner release is a
                // no-op, not an error.
                tracing::debug!(note_id = %note_id, user_id = %user_id, "Release denied, caller does not hold the lock");
                return false;
            }
            Err(e) => {
                tracing::error!(note_id = %note_id, error = %e, "Lock store failure during release");
                return false;
            }
        }

        let mut all_deleted = true;
        for &member in &stack {
            if let Err(e) = self.store.delete(member).await {
                tracing::error!(note_id = %member, error = %e, "Lock store failure deleting stack member");
                all_deleted = false;
            }
        }

        if all_deleted {
            self.publish(board_id, BoardEvent::NoteDragEnd { note_id, user_id })
                .await;
        }
        all_deleted
    }

    /// Union query: is any member of the stack group currently being dragged
    /// by anyone?
    ///
    /// Answers `true` on resolver or store failure -- a stack whose state
    /// cannot be confirmed is reported busy, never free.
    pub async fn is_locked(&self, note_id: NoteId) -> bool {
        let stack = match self.resolver.stack_of(note_id).await {
            Ok(stack) => stack,
            Err(e) => {
                tracing::error!(note_id = %note_id, error = %e, "Stack resolution failed, reporting busy");
                return true;
            }
        };

        for &member in &stack {
            match self.store.get(member).await {
                Ok(Some(_)) => return true,
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(note_id = %member, error = %e, "Lock store failure, reporting busy");
                    return true;
                }
            }
        }
        false
    }

    /// Single-key read, no stack expansion. Drives the "who is dragging"
    /// detail in the UI.
    pub async fn get_lock(&self, note_id: NoteId) -> Option<DragLock> {
        match self.store.get(note_id).await {
            Ok(lock) => lock,
            Err(e) => {
                tracing::error!(note_id = %note_id, error = %e, "Lock store failure reading lease");
                None
            }
        }
    }

    /// All live leases on a board. Drives reconnect reconciliation and the
    /// per-user disconnect sweep.
    pub async fn locks_for_board(&self, board_id: BoardId) -> Vec<DragLock> {
        match self.store.list_for_board(board_id).await {
            Ok(locks) => locks,
            Err(e) => {
                tracing::error!(board_id = %board_id, error = %e, "Lock store failure listing board leases");
                Vec::new()
            }
        }
    }

    /// Drop every lease `user_id` holds on a board, announcing each one.
    /// Other users' leases are untouched. Returns the number released.
    pub async fn release_user_locks(&self, board_id: BoardId, user_id: UserId) -> usize {
        let locks = self.locks_for_board(board_id).await;

        let mut released = 0;
        for lock in locks.into_iter().filter(|l| l.user_id == user_id) {
            match self.store.delete(lock.note_id).await {
                Ok(true) => {
                    released += 1;
                    self.publish(
                        board_id,
                        BoardEvent::NoteDragEnd {
                            note_id: lock.note_id,
                            user_id,
                        },
                    )
                    .await;
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::error!(note_id = %lock.note_id, error = %e, "Lock store failure during disconnect sweep");
                }
            }
        }

        if released > 0 {
            tracing::info!(board_id = %board_id, user_id = %user_id, released, "Released user leases");
        }
        released
    }

    /// Same-owner refresh path for a member that `create_if_absent` refused.
    async fn try_refresh_own(&self, member: NoteId, user_id: UserId) -> bool {
        match self.store.get(member).await {
            Ok(Some(held)) if held.user_id == user_id => {
                match self.store.refresh(member, self.ttl).await {
                    Ok(refreshed) => refreshed,
                    Err(e) => {
                        tracing::error!(note_id = %member, error = %e, "Lock store failure refreshing lease");
                        false
                    }
                }
            }
            // Held by someone else, or vanished between the two calls:
            // contention either way.
            Ok(_) => false,
            Err(e) => {
                tracing::error!(note_id = %member, error = %e, "Lock store failure reading contended lease");
                false
            }
        }
    }

    /// Undo the members locked by this call. A half-acquired stack is an
    /// observable inconsistency; an over-deleted absent key is not.
    async fn rollback(&self, created: &[NoteId]) {
        for &member in created {
            if let Err(e) = self.store.delete(member).await {
                tracing::error!(note_id = %member, error = %e, "Rollback delete failed");
            }
        }
    }

    async fn publish(&self, board_id: BoardId, event: BoardEvent) {
        if let Err(e) = self.broker.broadcast_to_board(board_id, event).await {
            tracing::error!(board_id = %board_id, error = %e, "Board broadcast failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
