use crate::{ConnectionRegistry, WsError};

use ih_directory::FeedKey;

use googletest::prelude::*;

#[tokio::test]
async fn given_room_when_register_then_counted_and_retrievable() {
    let registry = ConnectionRegistry::new(2);

    let id = registry
        .register(Some("u1".into()), FeedKey::user("u1"))
        .await
        .unwrap();

    assert_that!(registry.total_count().await, eq(1));
    let info = registry.get(id).await.unwrap();
    assert_that!(info.caller.as_deref(), some(eq("u1")));
    assert_that!(info.key, eq(&FeedKey::user("u1")));
}

#[tokio::test]
async fn given_full_registry_when_register_then_limit_error() {
    let registry = ConnectionRegistry::new(1);
    registry.register(None, FeedKey::AllUsers).await.unwrap();

    let result = registry.register(None, FeedKey::AllUsers).await;

    assert!(matches!(
        result,
        Err(WsError::ConnectionLimitExceeded { current: 1, max: 1, .. })
    ));
}

#[tokio::test]
async fn given_registered_when_unregister_then_slot_freed() {
    let registry = ConnectionRegistry::new(1);
    let id = registry.register(None, FeedKey::AllUsers).await.unwrap();

    registry.unregister(id).await;

    assert_that!(registry.total_count().await, eq(0));
    assert_that!(registry.register(None, FeedKey::AllUsers).await, ok(anything()));
}
