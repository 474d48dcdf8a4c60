/// In-memory gateway tests
///
/// Run with: cargo test --test gateway_tests
use accountbook::gateway::{Delivery, Gateway, MemoryGateway};
use accountbook::{AccountData, RecordId, SyncError, UserId, WriteError};
use tokio_test::assert_ok;

fn user(name: &str) -> UserId {
    UserId::from(name)
}

async fn next_snapshot(sub: &mut accountbook::Subscription) -> Vec<accountbook::AccountRecord> {
    match sub.next().await {
        Some(Delivery::Snapshot(records)) => records,
        other => panic!("expected snapshot, got {other:?}"),
    }
}

#[tokio::test]
async fn test_subscribe_delivers_current_collection_immediately() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");

    gateway
        .create(&owner, AccountData::new("alice", "pw"))
        .await
        .unwrap();

    let mut sub = gateway.subscribe(&owner).await.unwrap();
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].data.username, "alice");
}

#[tokio::test]
async fn test_every_write_pushes_a_fresh_snapshot() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");
    let mut sub = gateway.subscribe(&owner).await.unwrap();

    assert!(next_snapshot(&mut sub).await.is_empty());

    let id = assert_ok!(gateway.create(&owner, AccountData::new("alice", "pw")).await);
    assert_eq!(next_snapshot(&mut sub).await.len(), 1);

    assert_ok!(
        gateway
            .update(&owner, &id, AccountData::new("alice", "pw2").balance(3.0))
            .await
    );
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot[0].data.password, "pw2");
    assert_eq!(snapshot[0].data.balance, 3.0);

    assert_ok!(gateway.delete(&owner, &id).await);
    assert!(next_snapshot(&mut sub).await.is_empty());
}

#[tokio::test]
async fn test_update_is_whole_record_overwrite_preserving_position() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");

    let first = gateway
        .create(&owner, AccountData::new("alice", "pw").notes("keep me"))
        .await
        .unwrap();
    gateway
        .create(&owner, AccountData::new("bob", "pw"))
        .await
        .unwrap();

    // Overwrite with a record that has no notes: they must not survive.
    gateway
        .update(&owner, &first, AccountData::new("alice", "pw"))
        .await
        .unwrap();

    let mut sub = gateway.subscribe(&owner).await.unwrap();
    let snapshot = next_snapshot(&mut sub).await;
    assert_eq!(snapshot[0].id, first);
    assert_eq!(snapshot[0].data.notes, "");
    assert_eq!(snapshot[1].data.username, "bob");
}

#[tokio::test]
async fn test_unknown_record_fails_update_and_delete() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");
    gateway
        .create(&owner, AccountData::new("alice", "pw"))
        .await
        .unwrap();

    let missing = RecordId::from("no-such-id");
    let err = gateway
        .update(&owner, &missing, AccountData::new("x", "y"))
        .await
        .unwrap_err();
    assert!(matches!(err, WriteError::UnknownRecord(_)));

    let err = gateway.delete(&owner, &missing).await.unwrap_err();
    assert!(matches!(err, WriteError::UnknownRecord(_)));
}

#[tokio::test]
async fn test_empty_username_or_password_is_rejected() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");

    let err = gateway
        .create(&owner, AccountData::new("", "pw"))
        .await
        .unwrap_err();
    assert!(matches!(err, WriteError::Invalid(_)));

    let err = gateway
        .create(&owner, AccountData::new("alice", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, WriteError::Invalid(_)));

    assert_eq!(gateway.record_count(&owner).await, 0);
}

#[tokio::test]
async fn test_collections_are_scoped_per_user() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");
    let other = user("u2");

    gateway
        .create(&owner, AccountData::new("alice", "pw"))
        .await
        .unwrap();

    let mut other_sub = gateway.subscribe(&other).await.unwrap();
    assert!(next_snapshot(&mut other_sub).await.is_empty());

    // A write in one collection is never pushed into another.
    gateway
        .create(&other, AccountData::new("bob", "pw"))
        .await
        .unwrap();
    let snapshot = next_snapshot(&mut other_sub).await;
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].data.username, "bob");
    assert_eq!(gateway.record_count(&owner).await, 1);
}

#[tokio::test]
async fn test_revoke_interrupts_subscribers() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");

    gateway
        .create(&owner, AccountData::new("alice", "pw"))
        .await
        .unwrap();
    let mut sub = gateway.subscribe(&owner).await.unwrap();
    next_snapshot(&mut sub).await;

    gateway.revoke(&owner).await;

    match sub.next().await {
        Some(Delivery::Interrupted(SyncError::PermissionRevoked(who))) => {
            assert_eq!(who, "u1");
        }
        other => panic!("expected interruption, got {other:?}"),
    }

    // The channel is closed afterwards; no further deliveries arrive.
    assert!(sub.next().await.is_none());
}

#[tokio::test]
async fn test_snapshots_arrive_in_write_order() {
    let gateway = MemoryGateway::new();
    let owner = user("u1");
    let mut sub = gateway.subscribe(&owner).await.unwrap();
    next_snapshot(&mut sub).await;

    for i in 0..10 {
        gateway
            .create(&owner, AccountData::new(&format!("user{i}"), "pw"))
            .await
            .unwrap();
    }

    for expected in 1..=10 {
        assert_eq!(next_snapshot(&mut sub).await.len(), expected);
    }
}
