use std::sync::atomic::Ordering;

use bi_shared::req_args::LoginReqArgs;

use crate::helpers::{no_cb, spawn_app, TEST_ACCESS_TOKEN, TEST_EMAIL, TEST_REFRESH_TOKEN};

#[tokio::test]
async fn login_success_publishes_principal_and_persists_the_session() {
    // Arrange
    let app = spawn_app().await;
    assert!(!app.core_client.is_logged_in());

    // Act
    app.core_client
        .login(app.login_args(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("login failed");

    // Assert
    assert!(app.core_client.is_logged_in());
    let principal = app
        .core_client
        .principal()
        .expect("no principal after login");
    assert_eq!(principal.email.as_ref(), TEST_EMAIL);
    let persisted = app.persisted().expect("session was not persisted");
    assert_eq!(persisted.access_token.as_ref(), TEST_ACCESS_TOKEN);
    assert_eq!(persisted.refresh_token.as_ref(), TEST_REFRESH_TOKEN);
    assert_eq!(persisted.principal.email.as_ref(), TEST_EMAIL);
}

#[tokio::test]
async fn login_failure_surfaces_the_backend_message() {
    // Arrange
    let app = spawn_app().await;
    let args = LoginReqArgs::new(TEST_EMAIL, "wrong password".to_string().into());

    // Act
    let outcome = app
        .core_client
        .login(args, no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert_eq!(outcome.unwrap_err().to_string(), "Invalid credentials");
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
}

#[tokio::test]
async fn requests_carry_the_bearer_token_after_login() {
    // Arrange
    let app = spawn_app().await;

    // Act - Anonymous request gets turned away by the backend
    let before = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx");
    assert_eq!(before.unwrap_err().to_string(), "Session expired");

    // Act - Same request after login is accepted
    app.login_assert().await;
    let after = app
        .core_client
        .list_branches(no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert_eq!(after.expect("list failed after login").len(), 1);
}

#[tokio::test]
async fn permission_predicates_follow_the_logged_in_principal() {
    // Arrange
    let app = spawn_app().await;
    let held = "userManagement.view_customuser".try_into().unwrap();
    let not_held = "userManagement.delete_customuser".try_into().unwrap();
    assert!(!app.core_client.has_permission(&held));

    // Act
    app.login_assert().await;

    // Assert
    assert!(app.core_client.has_permission(&held));
    assert!(!app.core_client.has_permission(&not_held));
    assert!(app
        .core_client
        .has_any_permission(&[not_held.clone(), held.clone()]));
    assert!(!app.core_client.has_any_permission(&[not_held]));
}

#[tokio::test]
async fn logout_notifies_the_backend_with_the_refresh_token() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    app.core_client
        .logout(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("logout failed");

    // Assert
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
    let bodies = app.backend.logout_bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["refresh"], TEST_REFRESH_TOKEN);
}

#[tokio::test]
async fn logout_clears_locally_even_when_the_backend_rejects() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    app.backend.fail_logout.store(true, Ordering::SeqCst);

    // Act
    let outcome = app
        .core_client
        .logout(no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert!(outcome.is_ok());
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
}

#[tokio::test]
async fn logout_succeeds_locally_when_the_backend_is_unreachable() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    app.server_handle.abort();

    // Act
    let outcome = app
        .core_client
        .logout(no_cb)
        .await
        .expect("failed to receive on rx");

    // Assert
    assert!(outcome.is_ok());
    assert!(!app.core_client.is_logged_in());
    assert!(app.persisted().is_none());
}
