pub mod boards;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /boards/{board_id}/ws                WebSocket (drag-lock protocol)
/// /boards/{board_id}/locks             list live locks
/// /boards/{board_id}/locks/{note_id}   single-lock detail
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/boards", boards::router())
}
