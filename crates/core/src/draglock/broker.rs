//! Realtime broker seam.
//!
//! One board-scoped event per successful lock state transition. The broker
//! itself (fan-out, subscriber bookkeeping) lives outside this crate.

use async_trait::async_trait;

use crate::draglock::protocol::BoardEvent;
use crate::types::BoardId;

#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("Board broadcast failed: {0}")]
    Publish(String),
}

/// Publishes an event on a board's channel.
#[async_trait]
pub trait RealtimeBroker: Send + Sync {
    async fn broadcast_to_board(
        &self,
        board_id: BoardId,
        event: BoardEvent,
    ) -> Result<(), BrokerError>;
}
