//! End-to-end tests against a running server.
//!
//! All tests are `#[ignore]`d; see the crate docs for how to run them.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use fashionzone_client::{CartHandle, FavoritesHandle, FilterState, NotificationsHandle, SortBy};
use fashionzone_core::ProductId;
use fashionzone_integration_tests::{TestContext, base_url};

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_health_endpoints() {
    let http = reqwest::Client::new();

    let response = http.get(format!("{}/health", base_url())).send().await.unwrap();
    assert_eq!(response.status(), 200);

    let response = http
        .get(format!("{}/health/ready", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_catalog_browsing() {
    let ctx = TestContext::new();

    let all = ctx.client.products(None, None).await.unwrap();
    assert!(all.len() >= 8);

    let mut filter = FilterState::new();
    filter.set_gender(Some("women"));
    filter.sort_by = SortBy::PriceLowToHigh;
    let women = filter.apply(&ctx.client).await.unwrap();
    assert!(!women.is_empty());
    assert!(women.windows(2).all(|pair| pair[0].price <= pair[1].price));

    filter.set_search_query(Some("shirt"));
    let hits = filter.apply(&ctx.client).await.unwrap();
    assert!(hits.iter().all(|p| {
        let q = "shirt";
        p.name.to_lowercase().contains(q)
            || p.description.to_lowercase().contains(q)
            || p.category.to_lowercase().contains(q)
    }));
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_full_shopping_session() {
    let ctx = TestContext::new();
    ctx.register_fresh_account().await;

    let cart = CartHandle::new(Arc::clone(&ctx.client));
    assert_eq!(cart.count().await.unwrap(), 0);

    // Same product and size twice merges into one line
    cart.add(ProductId::new(1), "M", 1).await.unwrap();
    cart.add(ProductId::new(1), "M", 2).await.unwrap();
    let items = cart.items().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item.quantity, 3);

    let line_id = items[0].item.id;
    cart.update_quantity(line_id, 5).await.unwrap();
    assert_eq!(cart.count().await.unwrap(), 5);

    cart.remove(line_id).await.unwrap();
    assert_eq!(cart.count().await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_favorites_toggle() {
    let ctx = TestContext::new();
    ctx.register_fresh_account().await;

    let favorites = FavoritesHandle::new(Arc::clone(&ctx.client));
    let product = ProductId::new(3);

    assert!(!favorites.is_favorite(product).await.unwrap());
    assert!(favorites.toggle(product).await.unwrap());
    assert!(favorites.is_favorite(product).await.unwrap());

    // Toggling back removes it
    assert!(!favorites.toggle(product).await.unwrap());
    assert!(favorites.items().await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_demo_account_notifications() {
    let ctx = TestContext::new();
    ctx.client.login("demo", "password123").await.unwrap();

    let notifications = NotificationsHandle::new(Arc::clone(&ctx.client));
    let items = notifications.items().await.unwrap();
    assert!(!items.is_empty());

    // Mark the newest one read; the unread badge drops
    let before = notifications.unread_count().await.unwrap();
    if before > 0 {
        let unread = items.iter().find(|n| !n.read).unwrap();
        notifications.mark_read(unread.id).await.unwrap();
        assert_eq!(notifications.unread_count().await.unwrap(), before - 1);
    }
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_session_lifecycle() {
    let ctx = TestContext::new();
    let username = ctx.register_fresh_account().await;

    let user = ctx.client.current_user().await.unwrap();
    assert_eq!(user.username.as_str(), username);

    ctx.client.logout().await.unwrap();
    let err = ctx.client.current_user().await.unwrap_err();
    assert!(matches!(err, fashionzone_client::ClientError::Unauthorized));
}
