use std::sync::atomic::Ordering;

use bi_shared::report::AccountBaseFilters;

use crate::helpers::{no_cb, spawn_app, EXPORT_CSV};

#[tokio::test]
async fn report_cache_is_keyed_by_the_filter_combination() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;
    let unfiltered = AccountBaseFilters::default();
    let by_branch = AccountBaseFilters {
        branch_code: Some("BR001".to_string()),
        ..Default::default()
    };

    // Act
    let all = app
        .core_client
        .account_base_report(&unfiltered, no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("report failed");
    let all_again = app
        .core_client
        .account_base_report(&unfiltered, no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("report failed");
    let filtered = app
        .core_client
        .account_base_report(&by_branch, no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("filtered report failed");

    // Assert - Repeat with identical filters hit the cache, new filters did not
    assert_eq!(all.len(), 2);
    assert_eq!(all, all_again);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].branch_code, "BR001");
    assert_eq!(app.backend.report_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn stats_decode_including_buckets() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let stats = app
        .core_client
        .account_base_stats(no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("stats failed");

    // Assert
    assert_eq!(stats.total_accounts, 2);
    assert_eq!(stats.by_branch.len(), 2);
    assert!(stats.by_category.is_empty());
}

#[tokio::test]
async fn export_returns_the_raw_payload() {
    // Arrange
    let app = spawn_app().await;
    app.login_assert().await;

    // Act
    let bytes = app
        .core_client
        .export_account_base(&AccountBaseFilters::default(), no_cb)
        .await
        .expect("failed to receive on rx")
        .expect("export failed");

    // Assert
    assert_eq!(bytes, EXPORT_CSV);
}
