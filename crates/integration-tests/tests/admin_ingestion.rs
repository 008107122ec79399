//! Integration tests for the admin surface: gating and product ingestion.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The storefront server running (cargo run -p clementine-storefront)
//! - `ADMIN_EMAIL`/`ADMIN_PASSWORD` for an account granted admin rights
//! - For the feed import test: the catalog feed reachable from the server
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use clementine_core::Category;
use clementine_integration_tests::{base_url, client, location, login, register_user, unique_email};

/// Log in as the configured admin account.
async fn admin_client() -> reqwest::Client {
    let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL must be set for this test");
    let password =
        std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set for this test");

    let client = client();
    login(&client, &email, &password).await;
    client
}

// ============================================================================
// Authorization gating
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_admin_panel_forbidden_for_anonymous() {
    for path in ["/admin-panel", "/add-product-manual", "/add-product-api"] {
        let resp = client()
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("Failed to fetch admin route");

        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "path: {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn test_admin_panel_forbidden_for_plain_users() {
    let shopper = client();
    register_user(&shopper, &unique_email(), "integration-pass-1").await;

    let resp = shopper
        .get(format!("{}/admin-panel", base_url()))
        .send()
        .await
        .expect("Failed to fetch admin panel");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Manual creation
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server and admin credentials"]
async fn test_manual_duplicate_name_is_case_insensitive() {
    let admin = admin_client().await;
    // Digits-only suffix so title-case normalization keeps the name as-is.
    let name = format!("Unique Gadget {}", uuid::Uuid::new_v4().as_u128());

    let form = |n: &str| {
        vec![
            ("name", n.to_string()),
            ("description", "Integration test product".to_string()),
            ("price", "9.99".to_string()),
            ("discount", "0.20".to_string()),
            ("thumbnail", "https://cdn.example.com/t.webp".to_string()),
            ("image", "https://cdn.example.com/i.webp".to_string()),
            ("category", "electronics".to_string()),
            ("stock", "4".to_string()),
        ]
    };

    let resp = admin
        .post(format!("{}/add-product-manual", base_url()))
        .form(&form(&name))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(location(&resp), Some("/admin-panel"));

    // Same name, different case: rejected with a notice, back to the form.
    let resp = admin
        .post(format!("{}/add-product-manual", base_url()))
        .form(&form(&name.to_uppercase()))
        .send()
        .await
        .expect("Failed to submit duplicate product");
    assert_eq!(location(&resp), Some("/add-product-manual"));

    let page: Value = admin
        .get(format!("{}/add-product-manual", base_url()))
        .send()
        .await
        .expect("Failed to fetch manual form")
        .json()
        .await
        .expect("Failed to parse manual form");
    let notices = page["notices"].as_array().expect("notices missing");
    assert!(
        notices
            .iter()
            .any(|n| n.as_str().unwrap_or_default().contains("already exists"))
    );
}

#[tokio::test]
#[ignore = "Requires running storefront server and admin credentials"]
async fn test_manual_rejects_out_of_range_discount() {
    let admin = admin_client().await;

    let resp = admin
        .post(format!("{}/add-product-manual", base_url()))
        .form(&[
            ("name", "Bad Discount Gadget"),
            ("description", "Integration test product"),
            ("price", "9.99"),
            ("discount", "1.50"),
            ("thumbnail", "https://cdn.example.com/t.webp"),
            ("image", "https://cdn.example.com/i.webp"),
            ("category", "electronics"),
            ("stock", "4"),
        ])
        .send()
        .await
        .expect("Failed to submit product");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Feed import
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server, admin credentials, and feed access"]
async fn test_feed_import_skips_existing_and_remaps_category() {
    let admin = admin_client().await;

    let import = |admin: &reqwest::Client| {
        admin
            .post(format!("{}/add-product-api", base_url()))
            .form(&[
                ("product_type", "furniture"),
                ("category", Category::Home.as_str()),
            ])
            .send()
    };

    // First import creates; second must skip every item.
    let resp = import(&admin).await.expect("Failed to import feed category");
    assert_eq!(location(&resp), Some("/admin-panel"));
    let first: Value = admin
        .get(format!("{}/admin-panel", base_url()))
        .send()
        .await
        .expect("Failed to fetch admin panel")
        .json()
        .await
        .expect("Failed to parse admin panel");
    let first_notices = first["notices"].as_array().expect("notices missing");
    assert!(!first_notices.is_empty());

    let resp = import(&admin).await.expect("Failed to re-import feed category");
    assert_eq!(location(&resp), Some("/admin-panel"));
    let second: Value = admin
        .get(format!("{}/admin-panel", base_url()))
        .send()
        .await
        .expect("Failed to fetch admin panel")
        .json()
        .await
        .expect("Failed to parse admin panel");
    let second_notices = second["notices"].as_array().expect("notices missing");
    assert!(!second_notices.is_empty());
    assert!(
        second_notices
            .iter()
            .all(|n| !n.as_str().unwrap_or_default().contains("successfully added"))
    );

    // Imported items carry the internal category, so they show up under it.
    let listing: Value = client()
        .get(format!("{}/home", base_url()))
        .send()
        .await
        .expect("Failed to fetch category listing")
        .json()
        .await
        .expect("Failed to parse category listing");
    assert_eq!(listing["category"], "home");
}

#[tokio::test]
#[ignore = "Requires running storefront server and admin credentials"]
async fn test_feed_import_rejects_unknown_product_type() {
    let admin = admin_client().await;

    let resp = admin
        .post(format!("{}/add-product-api", base_url()))
        .form(&[("product_type", "zeppelins"), ("category", "home")])
        .send()
        .await
        .expect("Failed to submit import");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
