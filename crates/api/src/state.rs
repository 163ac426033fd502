use std::sync::Arc;

use retroboard_core::draglock::LockCoordinator;
use retroboard_events::EventBus;

use crate::config::ServerConfig;
use crate::ws::BoardWsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: retroboard_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Board-scoped WebSocket connection manager.
    pub ws_manager: Arc<BoardWsManager>,
    /// Realtime broker for board events.
    pub event_bus: Arc<EventBus>,
    /// Drag-lock coordinator shared by the WebSocket and HTTP surfaces.
    pub coordinator: Arc<LockCoordinator>,
}
