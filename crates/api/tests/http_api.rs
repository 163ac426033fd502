//! HTTP surface tests for the health and board-lock endpoints.
//!
//! The router is driven directly with `tower::ServiceExt::oneshot`; no
//! listener is bound. The lock coordinator runs on the in-memory store, and
//! the database pool is a lazy handle to an unreachable server so the health
//! endpoint's degraded path can be observed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

use retroboard_api::config::{LockBackend, LockConfig, ServerConfig};
use retroboard_api::routes;
use retroboard_api::state::AppState;
use retroboard_api::ws::BoardWsManager;
use retroboard_core::draglock::broker::RealtimeBroker;
use retroboard_core::draglock::resolver::{StackResolver, StackResolverError};
use retroboard_core::draglock::{LockCoordinator, MemoryLockStore};
use retroboard_core::types::NoteId;
use retroboard_events::EventBus;

/// Every note resolves to itself alone.
struct SoloResolver;

#[async_trait]
impl StackResolver for SoloResolver {
    async fn stack_of(&self, note_id: NoteId) -> Result<Vec<NoteId>, StackResolverError> {
        Ok(vec![note_id])
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".into(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        lock: LockConfig {
            backend: LockBackend::Memory,
            ttl_secs: 30,
            reaper_interval_secs: 10,
        },
    }
}

/// App wired like `main`, minus middleware, with an unreachable database.
fn test_app() -> (Router, Arc<LockCoordinator>) {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy("postgres://127.0.0.1:1/unreachable")
        .expect("lazy pool construction cannot fail");

    let event_bus = Arc::new(EventBus::default());
    let coordinator = Arc::new(LockCoordinator::with_default_ttl(
        Arc::new(MemoryLockStore::new()),
        Arc::new(SoloResolver),
        Arc::clone(&event_bus) as Arc<dyn RealtimeBroker>,
    ));

    let state = AppState {
        pool,
        config: Arc::new(test_config()),
        ws_manager: Arc::new(BoardWsManager::new()),
        event_bus,
        coordinator: Arc::clone(&coordinator),
    };

    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state);

    (app, coordinator)
}

async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_degraded_when_database_is_unreachable() {
    let (app, _) = test_app();

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["db_healthy"], false);
}

// ---------------------------------------------------------------------------
// Board locks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_board_lists_no_locks() {
    let (app, _) = test_app();
    let board = Uuid::new_v4();

    let (status, body) = get(app, &format!("/api/v1/boards/{board}/locks")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], serde_json::json!([]));
}

#[tokio::test]
async fn held_locks_appear_in_the_board_listing() {
    let (app, coordinator) = test_app();
    let board = Uuid::new_v4();
    let note = Uuid::new_v4();
    let user = Uuid::new_v4();

    assert!(coordinator.acquire_lock(note, user, board).await);

    let (status, body) = get(app, &format!("/api/v1/boards/{board}/locks")).await;

    assert_eq!(status, StatusCode::OK);
    let locks = body["data"].as_array().expect("data should be an array");
    assert_eq!(locks.len(), 1);
    assert_eq!(locks[0]["noteId"], note.to_string());
    assert_eq!(locks[0]["userId"], user.to_string());
}

#[tokio::test]
async fn lock_detail_returns_the_holder_or_404() {
    let (app, coordinator) = test_app();
    let board = Uuid::new_v4();
    let note = Uuid::new_v4();
    let user = Uuid::new_v4();

    let (status, _) = get(
        app.clone(),
        &format!("/api/v1/boards/{board}/locks/{note}"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert!(coordinator.acquire_lock(note, user, board).await);

    let (status, body) = get(app, &format!("/api/v1/boards/{board}/locks/{note}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["userId"], user.to_string());
}

#[tokio::test]
async fn malformed_board_id_is_rejected() {
    let (app, _) = test_app();

    let (status, _) = get(app, "/api/v1/boards/not-a-uuid/locks").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
