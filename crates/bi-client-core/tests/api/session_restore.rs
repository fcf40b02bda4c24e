use crate::helpers::{no_cb, spawn_app, TEST_ACCESS_TOKEN, TEST_EMAIL};

#[tokio::test]
async fn restore_with_empty_storage_resolves_to_anonymous() {
    // Arrange
    let app = spawn_app().await;
    assert!(app.core_client.session_state().is_loading());

    // Act
    let live = app
        .core_client
        .restore_session(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("restore errored");

    // Assert
    assert!(!live);
    assert!(!app.core_client.session_state().is_loading());
    assert!(!app.core_client.is_logged_in());
}

#[tokio::test]
async fn restore_confirms_a_valid_persisted_session() {
    // Arrange
    let app = spawn_app().await;
    app.seed_persisted_session(TEST_ACCESS_TOKEN);

    // Act
    let live = app
        .core_client
        .restore_session(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("restore errored");

    // Assert
    assert!(live);
    assert!(app.core_client.is_logged_in());
    let principal = app
        .core_client
        .principal()
        .expect("no principal after restore");
    assert_eq!(principal.email.as_ref(), TEST_EMAIL);
    assert!(app.persisted().is_some(), "session should stay persisted");
}

#[tokio::test]
async fn restore_with_a_rejected_token_demotes_and_clears_storage() {
    // Arrange
    let app = spawn_app().await;
    app.seed_persisted_session("stale-token");

    // Act
    let live = app
        .core_client
        .restore_session(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("restore errored");

    // Assert
    assert!(!live);
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
}

#[tokio::test]
async fn logout_during_revalidation_is_not_overridden_by_the_stale_result() {
    // Arrange
    let app = spawn_app().await;
    app.seed_persisted_session(TEST_ACCESS_TOKEN);

    // Act - Start the restore, then log out before awaiting its outcome
    let rx = app.core_client.restore_session(no_cb);
    app.core_client
        .logout(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("logout failed");
    // The revalidation outcome itself is timing dependent, only the final
    // state is asserted once both operations have resolved
    let _ = rx.await.expect("failed to receive on rx");

    // Assert - The logout wins regardless of what the revalidation returned
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
}
