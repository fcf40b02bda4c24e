use std::sync::atomic::Ordering;

use bi_shared::branch::BranchDraft;

use crate::helpers::{no_cb, spawn_app};

#[tokio::test]
async fn branch_list_is_served_from_cache_within_the_ttl() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let first = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("first list failed");
    let second = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("second list failed");

    // Assert - Second call did not reach the backend
    assert_eq!(first, second);
    assert_eq!(app.backend.branch_list_hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_branch_invalidates_the_cached_list() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    let before = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("list failed");
    assert_eq!(before.len(), 1);
    let draft = BranchDraft {
        code: "BR002".try_into().unwrap(),
        name: "East".to_string().try_into().unwrap(),
        manager: None,
    };

    // Act
    let created = app
        .core_client
        .create_branch(&draft, no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("create failed");

    // Assert - The next list goes back to the backend and sees the new branch
    assert_eq!(created.code, draft.code);
    let after = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("list failed");
    assert_eq!(app.backend.branch_list_hits.load(Ordering::SeqCst), 2);
    assert_eq!(after.len(), 2);
    assert!(after.iter().any(|branch| branch.code == draft.code));
}

#[tokio::test]
async fn failed_lists_are_not_cached() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act - The mock role endpoint always rejects
    for _ in 0..2 {
        let outcome = app
            .core_client
            .list_roles(no_cb)
            .await
            .expect("failed to receive on rx");
        assert_eq!(
            outcome.unwrap_err().to_string(),
            "Role service rejected the request"
        );
    }

    // Assert - Both attempts reached the backend
    assert_eq!(app.backend.role_list_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unparsable_error_bodies_fall_back_to_the_status_line() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act - The mock permission endpoint fails with a plain text body
    let outcome = app
        .core_client
        .list_permissions(no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "HTTP error: 503");
}
