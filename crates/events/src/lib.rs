//! Board-scoped realtime event fan-out.
//!
//! The [`EventBus`] is the realtime broker for the application: lock state
//! transitions are published per board and every subscriber (one per server
//! process, feeding that process's WebSocket connections) receives them.

pub mod bus;

pub use bus::{BoardMessage, EventBus};
