//! Fan-out from the board event bus to WebSocket subscribers.

mod router;

pub use router::BoardEventRouter;
