use crate::ShutdownCoordinator;

use googletest::prelude::*;
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn given_guard_when_shutdown_triggered_later_then_wait_returns() {
    // Given
    let coordinator = ShutdownCoordinator::new();
    let mut guard = coordinator.subscribe_guard();

    // When
    let trigger = coordinator.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        trigger.shutdown();
    });

    // Then
    let result = timeout(Duration::from_millis(500), guard.wait()).await;
    assert_that!(result, ok(anything()));
    assert_that!(guard.poll_shutdown(), eq(true));
}

#[tokio::test]
async fn given_shutdown_already_triggered_when_guard_created_then_wait_returns() {
    let coordinator = ShutdownCoordinator::new();
    coordinator.shutdown();

    let mut guard = coordinator.subscribe_guard();

    let result = timeout(Duration::from_millis(50), guard.wait()).await;
    assert_that!(result, ok(anything()));
    assert_that!(coordinator.is_shutdown(), eq(true));
}

#[tokio::test]
async fn given_many_guards_when_shutdown_then_all_released() {
    let coordinator = ShutdownCoordinator::new();
    let mut guards: Vec<_> = (0..5).map(|_| coordinator.subscribe_guard()).collect();

    coordinator.shutdown();
    coordinator.shutdown();

    for guard in &mut guards {
        let result = timeout(Duration::from_millis(50), guard.wait()).await;
        assert_that!(result, ok(anything()));
    }
}

#[test]
fn given_new_coordinator_when_checked_then_not_shutdown() {
    let coordinator = ShutdownCoordinator::new();
    let guard = coordinator.subscribe_guard();

    assert_that!(guard.poll_shutdown(), eq(false));
    assert_that!(coordinator.is_shutdown(), eq(false));
}
