//! WebSocket infrastructure for real-time board communication.
//!
//! Provides board-scoped connection management, heartbeat monitoring, the
//! drag-lock protocol dispatch, and the HTTP upgrade handler used by Axum
//! routes.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{board_ws_handler, dispatch};
pub use heartbeat::start_heartbeat;
pub use manager::BoardWsManager;
