//! Unit tests for `WsManager`.
//!
//! These tests exercise the fan-out hub directly, without performing any
//! HTTP upgrades. They verify user-group targeting, device command
//! groups, snapshot broadcast semantics, and shutdown behaviour.

use axum::extract::ws::Message;
use waypost_api::ws::WsManager;

fn text(payload: &str) -> Message {
    Message::Text(payload.to_string().into())
}

// ---------------------------------------------------------------------------
// Connection lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_manager_has_zero_connections() {
    let manager = WsManager::new();

    assert_eq!(manager.connection_count().await, 0);
}

#[tokio::test]
async fn add_and_remove_track_connection_count() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;
    assert_eq!(manager.connection_count().await, 1);

    manager.remove("conn-1").await;
    assert_eq!(manager.connection_count().await, 0);

    // Removing an unknown id is a no-op.
    manager.remove("nonexistent").await;
    assert_eq!(manager.connection_count().await, 0);
}

// ---------------------------------------------------------------------------
// Per-user groups
// ---------------------------------------------------------------------------

/// A user-group send reaches every connection of that user and nobody
/// else.
#[tokio::test]
async fn send_to_user_targets_only_that_user() {
    let manager = WsManager::new();

    let mut alice_phone = manager.add("alice-phone".to_string(), 1).await;
    let mut alice_laptop = manager.add("alice-laptop".to_string(), 1).await;
    let mut bob = manager.add("bob".to_string(), 2).await;

    let sent = manager.send_to_user(1, text("hello alice")).await;
    assert_eq!(sent, 2);

    assert!(alice_phone.recv().await.is_some());
    assert!(alice_laptop.recv().await.is_some());
    assert!(
        bob.try_recv().is_err(),
        "bob must not receive alice's update"
    );
}

/// Sending to a user with no connections is a harmless no-op.
#[tokio::test]
async fn send_to_absent_user_is_noop() {
    let manager = WsManager::new();

    let sent = manager.send_to_user(42, text("anyone there?")).await;
    assert_eq!(sent, 0);
}

// ---------------------------------------------------------------------------
// Device command groups
// ---------------------------------------------------------------------------

/// Only joined connections receive device-group sends; leaving stops
/// delivery.
#[tokio::test]
async fn device_group_join_and_leave() {
    let manager = WsManager::new();

    let mut joined = manager.add("joined".to_string(), 1).await;
    let mut other = manager.add("other".to_string(), 1).await;

    manager.join_device("joined", 7).await;

    let sent = manager.send_to_device(7, text("ring")).await;
    assert_eq!(sent, 1);
    assert!(joined.recv().await.is_some());
    assert!(other.try_recv().is_err());

    manager.leave_device("joined", 7).await;
    let sent = manager.send_to_device(7, text("ring")).await;
    assert_eq!(sent, 0);
}

/// Leaving a group that was never joined is a no-op.
#[tokio::test]
async fn leave_without_join_is_noop() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;
    manager.leave_device("conn-1", 7).await;

    assert_eq!(manager.send_to_device(7, text("ring")).await, 0);
}

/// Multiple connections may represent the same physical device; a ring
/// reaches all of them.
#[tokio::test]
async fn device_group_supports_multiple_members() {
    let manager = WsManager::new();

    let mut first = manager.add("first".to_string(), 1).await;
    let mut second = manager.add("second".to_string(), 1).await;
    manager.join_device("first", 7).await;
    manager.join_device("second", 7).await;

    let sent = manager.send_to_device(7, text("ring")).await;
    assert_eq!(sent, 2);
    assert!(first.recv().await.is_some());
    assert!(second.recv().await.is_some());
}

/// Disconnecting implicitly drops group membership.
#[tokio::test]
async fn remove_drops_group_membership() {
    let manager = WsManager::new();

    let _rx = manager.add("conn-1".to_string(), 1).await;
    manager.join_device("conn-1", 7).await;
    manager.remove("conn-1").await;

    assert_eq!(manager.send_to_device(7, text("ring")).await, 0);
    assert_eq!(manager.send_to_user(1, text("update")).await, 0);
}

// ---------------------------------------------------------------------------
// Shutdown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn shutdown_all_sends_close_and_clears() {
    let manager = WsManager::new();

    let mut rx1 = manager.add("conn-1".to_string(), 1).await;
    let mut rx2 = manager.add("conn-2".to_string(), 2).await;
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

/// A closed receiver does not poison group sends for everyone else.
#[tokio::test]
async fn dead_receivers_are_skipped() {
    let manager = WsManager::new();

    let rx_dead = manager.add("dead".to_string(), 1).await;
    let mut rx_live = manager.add("live".to_string(), 1).await;
    drop(rx_dead);

    manager.send_to_user(1, text("still works")).await;
    assert!(rx_live.recv().await.is_some());
}
