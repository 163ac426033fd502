//! Unit tests for `BoardWsManager`.
//!
//! These tests exercise the board-scoped connection manager directly, without
//! performing any HTTP upgrades. They verify add/remove semantics, board
//! broadcast delivery, actor exclusion, and graceful shutdown behaviour.

use axum::extract::ws::Message;
use uuid::Uuid;

use retroboard_api::ws::BoardWsManager;

// ---------------------------------------------------------------------------
// Test: new manager starts with zero connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = BoardWsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: add()/remove() track the connection count
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = BoardWsManager::new();

    let _rx = manager
        .add("conn-1".to_string(), Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Test: remove() with unknown ID is a no-op
// ---------------------------------------------------------------------------

#[tokio::test]
async fn remove_unknown_id_is_noop() {
    let manager = BoardWsManager::new();

    let _rx = manager
        .add("conn-1".to_string(), Uuid::new_v4(), Uuid::new_v4())
        .await;
    manager.remove("nonexistent").await;

    assert_eq!(manager.connection_count().await, 1);
}

// ---------------------------------------------------------------------------
// Test: send_to() targets exactly one connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_to_reaches_only_the_named_connection() {
    let manager = BoardWsManager::new();
    let board = Uuid::new_v4();

    let mut rx1 = manager
        .add("conn-1".to_string(), board, Uuid::new_v4())
        .await;
    let mut rx2 = manager
        .add("conn-2".to_string(), board, Uuid::new_v4())
        .await;

    assert!(
        manager
            .send_to("conn-1", Message::Text("direct reply".into()))
            .await
    );
    assert!(!manager.send_to("ghost", Message::Text("lost".into())).await);

    let msg = rx1.recv().await.expect("conn-1 should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "direct reply"));
    assert!(
        rx2.try_recv().is_err(),
        "conn-2 must not see conn-1's direct reply"
    );
}

// ---------------------------------------------------------------------------
// Test: broadcast_to_board() stays inside the board
// ---------------------------------------------------------------------------

#[tokio::test]
async fn board_broadcast_does_not_cross_boards() {
    let manager = BoardWsManager::new();
    let board = Uuid::new_v4();
    let other_board = Uuid::new_v4();

    let mut rx1 = manager
        .add("conn-1".to_string(), board, Uuid::new_v4())
        .await;
    let mut rx2 = manager
        .add("conn-2".to_string(), board, Uuid::new_v4())
        .await;
    let mut rx3 = manager
        .add("conn-3".to_string(), other_board, Uuid::new_v4())
        .await;

    manager
        .broadcast_to_board(board, Message::Text("hello board".into()))
        .await;

    let msg1 = rx1.recv().await.expect("rx1 should receive broadcast");
    let msg2 = rx2.recv().await.expect("rx2 should receive broadcast");
    assert!(matches!(&msg1, Message::Text(t) if *t == "hello board"));
    assert!(matches!(&msg2, Message::Text(t) if *t == "hello board"));

    assert!(
        rx3.try_recv().is_err(),
        "another board's connection must not receive the broadcast"
    );
}

// ---------------------------------------------------------------------------
// Test: send_to_board_except_user() skips the acting user
// ---------------------------------------------------------------------------

#[tokio::test]
async fn except_user_fanout_skips_all_of_that_users_connections() {
    let manager = BoardWsManager::new();
    let board = Uuid::new_v4();
    let actor = Uuid::new_v4();

    // The actor has two tabs open; a third connection belongs to a viewer.
    let mut actor_rx1 = manager.add("actor-1".to_string(), board, actor).await;
    let mut actor_rx2 = manager.add("actor-2".to_string(), board, actor).await;
    let mut viewer_rx = manager
        .add("viewer".to_string(), board, Uuid::new_v4())
        .await;

    let sent = manager
        .send_to_board_except_user(board, actor, Message::Text("drag started".into()))
        .await;

    assert_eq!(sent, 1);
    let msg = viewer_rx.recv().await.expect("viewer should receive");
    assert!(matches!(&msg, Message::Text(t) if *t == "drag started"));
    assert!(actor_rx1.try_recv().is_err());
    assert!(actor_rx2.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Test: broadcast skips closed channels without panicking
// ---------------------------------------------------------------------------

#[tokio::test]
async fn broadcast_skips_closed_channels() {
    let manager = BoardWsManager::new();
    let board = Uuid::new_v4();

    let rx1 = manager
        .add("conn-1".to_string(), board, Uuid::new_v4())
        .await;
    let mut rx2 = manager
        .add("conn-2".to_string(), board, Uuid::new_v4())
        .await;

    // Drop rx1 to close its channel.
    drop(rx1);

    manager
        .broadcast_to_board(board, Message::Text("still alive".into()))
        .await;

    let msg = rx2.recv().await.expect("rx2 should receive broadcast");
    assert!(matches!(&msg, Message::Text(t) if *t == "still alive"));
}

// ---------------------------------------------------------------------------
// Test: shutdown_all() sends Close and clears all connections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = BoardWsManager::new();

    let mut rx1 = manager
        .add("conn-1".to_string(), Uuid::new_v4(), Uuid::new_v4())
        .await;
    let mut rx2 = manager
        .add("conn-2".to_string(), Uuid::new_v4(), Uuid::new_v4())
        .await;
    assert_eq!(manager.connection_count().await, 2);

    manager.shutdown_all().await;

    assert_eq!(manager.connection_count().await, 0);

    let msg1 = rx1.recv().await.expect("rx1 should receive Close");
    assert!(
        matches!(msg1, Message::Close(None)),
        "Expected Close(None), got: {msg1:?}"
    );

    let msg2 = rx2.recv().await.expect("rx2 should receive Close");
    assert!(
        matches!(msg2, Message::Close(None)),
        "Expected Close(None), got: {msg2:?}"
    );

    // After Close, the channel should be closed (no more messages).
    assert!(
        rx1.recv().await.is_none(),
        "Channel should be closed after shutdown"
    );
}

// ---------------------------------------------------------------------------
// Test: adding with duplicate ID replaces the previous connection
// ---------------------------------------------------------------------------

#[tokio::test]
async fn duplicate_id_replaces_previous_connection() {
    let manager = BoardWsManager::new();
    let board = Uuid::new_v4();

    let _rx_old = manager
        .add("conn-1".to_string(), board, Uuid::new_v4())
        .await;
    assert_eq!(manager.connection_count().await, 1);

    // Re-add with the same ID -- should replace, not duplicate.
    let mut rx_new = manager
        .add("conn-1".to_string(), board, Uuid::new_v4())
        .await;
    assert_eq!(manager.connection_count().await, 1);

    manager
        .broadcast_to_board(board, Message::Text("replaced".into()))
        .await;
    let msg = rx_new.recv().await.expect("New rx should receive message");
    assert!(matches!(&msg, Message::Text(t) if *t == "replaced"));
}
