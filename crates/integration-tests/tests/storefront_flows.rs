//! Integration tests for the public storefront surface.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p clementine-storefront)
//! - For the cart tests: `ADMIN_EMAIL`/`ADMIN_PASSWORD` for an account
//!   granted admin rights via `clem-cli admin grant`
//! - A mostly-empty catalog: listings sample at most 8 random products,
//!   so the cart tests find their fixture product via the category page
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use clementine_integration_tests::{
    base_url, client, location, login, register_user, unique_email,
};

/// Log in as the configured admin account.
async fn admin_client() -> reqwest::Client {
    let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set for this test");
    let password =
        std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set for this test");

    let client = client();
    login(&client, &email, &password).await;
    client
}

/// Create a product through the manual admin form and return its name.
///
/// The suffix is digits-only so the server's title-case normalization
/// stores the name exactly as generated.
async fn create_product(admin: &reqwest::Client, stock: i32) -> String {
    let name = format!("Test Widget {}", uuid::Uuid::new_v4().as_u128());
    let resp = admin
        .post(format!("{}/add-product-manual", base_url()))
        .form(&[
            ("name", name.as_str()),
            ("description", "Integration test product"),
            ("price", "19.99"),
            ("discount", "0.15"),
            ("thumbnail", "https://cdn.example.com/t.webp"),
            ("image", "https://cdn.example.com/i.webp"),
            ("category", "electronics"),
            ("stock", &stock.to_string()),
        ])
        .send()
        .await
        .expect("Failed to create product");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), Some("/admin-panel"));
    name
}

/// Look a product's id and stock up via the category listing.
async fn find_product(client: &reqwest::Client, name: &str) -> Option<(i64, i64)> {
    let resp = client
        .get(format!("{}/electronics", base_url()))
        .send()
        .await
        .expect("Failed to fetch category listing");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse category listing");
    body["products"].as_array().and_then(|products| {
        products
            .iter()
            .find(|p| p["name"] == name)
            .map(|p| (p["id"].as_i64().unwrap_or(0), p["stock"].as_i64().unwrap_or(0)))
    })
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_health() {
    let resp = client()
        .get(format!("{}/health", base_url()))
        .send()
        .await
        .expect("Failed to reach health endpoint");

    assert_eq!(resp.status(), StatusCode::OK);
}

// ============================================================================
// Registration & Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_duplicate_registration_redirects_to_login() {
    let email = unique_email();

    let client = client();
    register_user(&client, &email, "integration-pass-1").await;

    // Second registration under the same email must not create a user;
    // it redirects to the login page with a notice.
    let second = clementine_integration_tests::client();
    let resp = second
        .post(format!("{}/register", base_url()))
        .form(&[
            ("name", "Copycat"),
            ("email", email.as_str()),
            ("password", "integration-pass-2"),
        ])
        .send()
        .await
        .expect("Failed to submit duplicate registration");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), Some("/login"));

    // The original password still works; the second one never registered.
    login(&client, &email, "integration-pass-1").await;
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_login_notices_distinguish_unknown_email_from_wrong_password() {
    let email = unique_email();
    let client = client();
    register_user(&client, &email, "integration-pass-1").await;

    // Unknown email
    let stranger = clementine_integration_tests::client();
    let resp = stranger
        .post(format!("{}/login", base_url()))
        .form(&[("email", "nobody@integration.clementine.test"), ("password", "whatever-pass")])
        .send()
        .await
        .expect("Failed to submit login");
    assert_eq!(location(&resp), Some("/login"));
    let page: Value = stranger
        .get(format!("{}/login", base_url()))
        .send()
        .await
        .expect("Failed to fetch login page")
        .json()
        .await
        .expect("Failed to parse login page");
    let notice = page["notices"][0].as_str().unwrap_or_default().to_string();
    assert!(notice.contains("no user registered"), "got notice: {notice}");

    // Wrong password for a known email
    let resp = stranger
        .post(format!("{}/login", base_url()))
        .form(&[("email", email.as_str()), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to submit login");
    assert_eq!(location(&resp), Some("/login"));
    let page: Value = stranger
        .get(format!("{}/login", base_url()))
        .send()
        .await
        .expect("Failed to fetch login page")
        .json()
        .await
        .expect("Failed to parse login page");
    let notice = page["notices"][0].as_str().unwrap_or_default().to_string();
    assert!(notice.contains("incorrect"), "got notice: {notice}");
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and admin credentials"]
async fn test_cart_reserves_stock_until_empty() {
    let admin = admin_client().await;
    let name = create_product(&admin, 3).await;

    let shopper = client();
    register_user(&shopper, &unique_email(), "integration-pass-1").await;

    let (product_id, stock) = find_product(&shopper, &name)
        .await
        .expect("product missing from category listing");
    assert_eq!(stock, 3);

    // Three adds drain the stock into the cart line.
    for _ in 0..3 {
        let resp = shopper
            .get(format!("{}/cart-add?product_id={product_id}", base_url()))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(location(&resp), Some("/cart"));
    }

    let cart: Value = shopper
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Failed to parse cart");
    let item = cart["items"]
        .as_array()
        .and_then(|items| items.iter().find(|i| i["product"]["name"] == name))
        .expect("cart line missing");
    assert_eq!(item["quantity"], 3);
    assert_eq!(item["product"]["stock"], 0);

    // Out of stock now: the fourth add is a no-op with a notice.
    let resp = shopper
        .get(format!("{}/cart-add?product_id={product_id}", base_url()))
        .send()
        .await
        .expect("Failed to submit fourth add");
    assert_eq!(location(&resp), Some("/cart"));

    let cart: Value = shopper
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Failed to parse cart");
    let item = cart["items"]
        .as_array()
        .and_then(|items| items.iter().find(|i| i["product"]["name"] == name))
        .expect("cart line missing");
    assert_eq!(item["quantity"], 3);
    let notices = cart["notices"].as_array().expect("notices missing");
    assert!(
        notices
            .iter()
            .any(|n| n.as_str().unwrap_or_default().contains("out of stock"))
    );

    // A sold-out product disappears from listings.
    assert!(find_product(&shopper, &name).await.is_none());
}

#[tokio::test]
#[ignore = "Requires running storefront server and admin credentials"]
async fn test_cart_remove_then_add_roundtrips() {
    let admin = admin_client().await;
    let name = create_product(&admin, 2).await;

    let shopper = client();
    register_user(&shopper, &unique_email(), "integration-pass-1").await;

    let (product_id, _) = find_product(&shopper, &name)
        .await
        .expect("product missing from category listing");

    for _ in 0..2 {
        shopper
            .get(format!("{}/cart-add?product_id={product_id}", base_url()))
            .send()
            .await
            .expect("Failed to add to cart");
    }

    shopper
        .get(format!("{}/cart-delete?product_id={product_id}", base_url()))
        .send()
        .await
        .expect("Failed to remove from cart");
    shopper
        .get(format!("{}/cart-add?product_id={product_id}", base_url()))
        .send()
        .await
        .expect("Failed to re-add to cart");

    let cart: Value = shopper
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart")
        .json()
        .await
        .expect("Failed to parse cart");
    let item = cart["items"]
        .as_array()
        .and_then(|items| items.iter().find(|i| i["product"]["name"] == name))
        .expect("cart line missing");
    assert_eq!(item["quantity"], 2);
    assert_eq!(item["product"]["stock"], 0);
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_cart_requires_login() {
    let resp = client()
        .get(format!("{}/cart", base_url()))
        .send()
        .await
        .expect("Failed to fetch cart");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), Some("/login"));
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_category_listing_only_shows_in_stock() {
    let resp = client()
        .get(format!("{}/electronics", base_url()))
        .send()
        .await
        .expect("Failed to fetch category listing");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse listing");
    for product in body["products"].as_array().expect("products missing") {
        assert!(product["stock"].as_i64().unwrap_or(0) > 0);
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_unknown_category_is_a_client_error() {
    let resp = client()
        .get(format!("{}/garden", base_url()))
        .send()
        .await
        .expect("Failed to fetch unknown category");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
