//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for board events. It is designed
//! to be shared via `Arc<EventBus>` across the application and implements the
//! [`RealtimeBroker`] seam consumed by the lock coordinator.

use async_trait::async_trait;
use tokio::sync::broadcast;

use retroboard_core::draglock::broker::{BrokerError, RealtimeBroker};
use retroboard_core::draglock::protocol::BoardEvent;
use retroboard_core::types::BoardId;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// An event scoped to one board's channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardMessage {
    pub board_id: BoardId,
    pub event: BoardEvent,
}

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`BoardMessage`].
///
/// # Usage
///
/// ```rust
/// use retroboard_events::EventBus;
/// use retroboard_core::draglock::protocol::BoardEvent;
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(uuid::Uuid::new_v4(), BoardEvent::NoteDragStart {
///     note_id: uuid::Uuid::new_v4(),
///     user_id: uuid::Uuid::new_v4(),
/// });
/// ```
pub struct EventBus {
    sender: broadcast::Sender<BoardMessage>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event on a board's channel.
    ///
    /// If there are no active subscribers the event is silently dropped;
    /// lock state itself lives in the store, not on this bus.
    pub fn publish(&self, board_id: BoardId, event: BoardEvent) {
        // Ignore the SendError -- it only means there are zero receivers.
        let _ = self.sender.send(BoardMessage { board_id, event });
    }

    /// Subscribe to all board events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<BoardMessage> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl RealtimeBroker for EventBus {
    async fn broadcast_to_board(
        &self,
        board_id: BoardId,
        event: BoardEvent,
    ) -> Result<(), BrokerError> {
        self.publish(board_id, event);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive_single_subscriber() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let board_id = uuid::Uuid::new_v4();
        let note_id = uuid::Uuid::new_v4();
        let user_id = uuid::Uuid::new_v4();
        bus.publish(board_id, BoardEvent::NoteDragStart { note_id, user_id });

        let received = rx.recv().await.expect("should receive the event");
        assert_eq!(received.board_id, board_id);
        assert_eq!(received.event, BoardEvent::NoteDragStart { note_id, user_id });
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let board_id = uuid::Uuid::new_v4();
        bus.publish(
            board_id,
            BoardEvent::NoteDragEnd {
                note_id: uuid::Uuid::new_v4(),
                user_id: uuid::Uuid::new_v4(),
            },
        );

        let e1 = rx1.recv().await.expect("subscriber 1 should receive");
        let e2 = rx2.recv().await.expect("subscriber 2 should receive");

        assert_eq!(e1.board_id, board_id);
        assert_eq!(e1, e2);
    }

    #[test]
    fn publish_with_no_subscribers_does_not_panic() {
        let bus = EventBus::default();
        // No subscribers -- this must not panic.
        bus.publish(
            uuid::Uuid::new_v4(),
            BoardEvent::NoteDragStart {
                note_id: uuid::Uuid::new_v4(),
                user_id: uuid::Uuid::new_v4(),
            },
        );
    }

    #[tokio::test]
    async fn broker_seam_publishes_through_the_bus() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let board_id = uuid::Uuid::new_v4();
        let event = BoardEvent::NoteDragStart {
            note_id: uuid::Uuid::new_v4(),
            user_id: uuid::Uuid::new_v4(),
        };
        bus.broadcast_to_board(board_id, event.clone())
            .await
            .expect("broker publish should succeed");

        let received = rx.recv().await.unwrap();
        assert_eq!(received.event, event);
    }
}
