//! Cart store scenarios: optimistic mutations, exact rollback on server
//! rejection, and derived-field recomputation.

use eazika_core::{AddToCartPayload, AddressId, CartItemId, OrderId, OrderStatus, ProductId};
use eazika_client::stores::CartStore;
use eazika_integration_tests::TestContext;
use reqwest::Method;
use rust_decimal_macros::dec;
use serde_json::json;

fn cart_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 1,
                "quantity": 2,
                "productDetails": {"name": "Basmati Rice 5kg", "price": "50.00", "image": null}
            },
            {
                "id": 2,
                "quantity": 1,
                "productDetails": {"name": "Sunflower Oil 1L", "price": "19.50"}
            }
        ]
    })
}

async fn seeded_store(ctx: &TestContext) -> CartStore {
    ctx.transport.push_json(200, cart_body());
    let store = CartStore::new(&ctx.client);
    store.fetch_cart().await.expect("seed fetch should succeed");
    store
}

#[tokio::test]
async fn fetch_cart_populates_items_and_derived_fields() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(119.50));
    assert!(!store.is_loading().await);

    let requests = ctx.transport.requests();
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, "/cart");
}

#[tokio::test]
async fn fetch_cart_coerces_non_array_payload_to_empty() {
    let ctx = TestContext::with_tokens("tok", None);
    ctx.transport.push_json(200, json!({"data": {"cart": null}}));

    let store = CartStore::new(&ctx.client);
    store.fetch_cart().await.expect("coerced fetch succeeds");

    assert_eq!(store.cart_count().await, 0);
    assert_eq!(store.cart_total().await, dec!(0));
}

#[tokio::test]
async fn fetch_cart_failure_keeps_previous_state() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_network_error("backend unreachable");
    store
        .fetch_cart()
        .await
        .expect_err("fetch failure must propagate");

    // previous cart survives, no silent reset to empty
    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(119.50));
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn add_to_cart_refetches_for_joined_details() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(201, json!({"message": "added"}));
    ctx.transport.push_json(200, cart_body());

    store
        .add_to_cart(&AddToCartPayload {
            product_id: ProductId::new(7),
            quantity: 1,
        })
        .await
        .expect("add should succeed");

    let requests = ctx.transport.requests();
    // seed fetch + add + follow-up fetch
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, "/cart/add");
    assert_eq!(requests[2].path, "/cart");
}

#[tokio::test]
async fn add_to_cart_failure_leaves_state_unchanged() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(400, json!({"message": "stock exhausted"}));
    store
        .add_to_cart(&AddToCartPayload {
            product_id: ProductId::new(7),
            quantity: 99,
        })
        .await
        .expect_err("rejected add must propagate");

    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(119.50));
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn remove_is_optimistic_and_hits_the_remove_endpoint() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(200, json!({"message": "removed"}));
    store
        .remove_from_cart(CartItemId::new(1))
        .await
        .expect("remove should succeed");

    assert_eq!(store.cart_count().await, 1);
    assert_eq!(store.cart_total().await, dec!(19.50));

    let requests = ctx.transport.requests();
    assert_eq!(requests[1].method, Method::DELETE);
    assert_eq!(requests[1].path, "/cart/remove/1");
}

#[tokio::test]
async fn remove_failure_rolls_back_to_exact_previous_state() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;
    let before = store.items().await;

    ctx.transport.push_network_error("backend unreachable");
    store
        .remove_from_cart(CartItemId::new(1))
        .await
        .expect_err("remove failure must propagate");

    assert_eq!(store.items().await, before);
    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(119.50));
}

#[tokio::test]
async fn update_quantity_recomputes_total_but_not_count() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(200, json!({"message": "updated"}));
    store
        .update_quantity(CartItemId::new(1), 3)
        .await
        .expect("update should succeed");

    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(169.50));

    let requests = ctx.transport.requests();
    assert_eq!(requests[1].method, Method::PUT);
    assert_eq!(requests[1].path, "/cart/update/1");
}

#[tokio::test]
async fn update_quantity_failure_rolls_back() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;
    let before = store.items().await;

    ctx.transport.push_json(409, json!({"message": "stock exhausted"}));
    store
        .update_quantity(CartItemId::new(1), 50)
        .await
        .expect_err("rejected update must propagate");

    assert_eq!(store.items().await, before);
    assert_eq!(store.cart_total().await, dec!(119.50));
}

#[tokio::test]
async fn zero_quantity_is_a_no_op_with_no_network_call() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;
    let dispatches_after_seed = ctx.transport.dispatch_count();

    store
        .update_quantity(CartItemId::new(1), 0)
        .await
        .expect("no-op must be Ok");

    assert_eq!(ctx.transport.dispatch_count(), dispatches_after_seed);
    assert_eq!(store.cart_total().await, dec!(119.50));
}

#[tokio::test]
async fn clear_cart_failure_restores_all_items() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;
    let before = store.items().await;

    ctx.transport.push_network_error("backend unreachable");
    store
        .clear_cart()
        .await
        .expect_err("clear failure must propagate");

    assert_eq!(store.items().await, before);
    assert_eq!(store.cart_count().await, 2);
    assert_eq!(store.cart_total().await, dec!(119.50));
}

#[tokio::test]
async fn clear_cart_success_empties_the_cart() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(200, json!({"message": "cleared"}));
    store.clear_cart().await.expect("clear should succeed");

    assert!(store.items().await.is_empty());
    assert_eq!(store.cart_count().await, 0);
    assert_eq!(store.cart_total().await, dec!(0));
}

#[tokio::test]
async fn place_order_resets_the_cart_on_success() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;

    ctx.transport.push_json(
        201,
        json!({
            "data": {
                "id": 42,
                "status": "pending",
                "totalAmount": "119.50",
                "paymentMethod": "cod",
                "createdAt": "2025-06-01T09:00:00Z"
            }
        }),
    );

    let order = store
        .place_order(&eazika_core::OrderPayload {
            address_id: AddressId::new(3),
            payment_method: "cod".to_string(),
            note: None,
        })
        .await
        .expect("order should be created");

    assert_eq!(order.id, OrderId::new(42));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.total_amount, dec!(119.50));

    assert!(store.items().await.is_empty());
    assert_eq!(store.cart_count().await, 0);
    assert!(!store.is_loading().await);

    let requests = ctx.transport.requests();
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, "/orders/create");
}

#[tokio::test]
async fn place_order_failure_leaves_the_cart_intact() {
    let ctx = TestContext::with_tokens("tok", None);
    let store = seeded_store(&ctx).await;
    let before = store.items().await;

    ctx.transport
        .push_json(400, json!({"message": "address missing"}));

    store
        .place_order(&eazika_core::OrderPayload {
            address_id: AddressId::new(3),
            payment_method: "cod".to_string(),
            note: None,
        })
        .await
        .expect_err("rejected order must propagate");

    assert_eq!(store.items().await, before);
    assert_eq!(store.cart_total().await, dec!(119.50));
    assert!(!store.is_loading().await);
}
