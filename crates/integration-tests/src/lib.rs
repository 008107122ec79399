//! Integration tests for Clementine Market.
//!
//! # Running Tests
//!
//! These tests drive a running storefront over HTTP, so they are
//! `#[ignore]`d by default:
//!
//! ```bash
//! # Start PostgreSQL, run migrations, start the storefront, then:
//! cargo test -p clementine-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_BASE_URL` - Base URL of the running storefront
//!   (default: `http://localhost:3000`)
//! - `ADMIN_EMAIL` / `ADMIN_PASSWORD` - Credentials of an account that has
//!   been granted admin rights (`clem-cli admin grant`); required by the
//!   admin ingestion tests

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the storefront (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Create an HTTP client with a cookie store, keeping the session across
/// requests. Redirects are NOT followed so tests can assert on them.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email for a throwaway test account.
#[must_use]
pub fn unique_email() -> String {
    format!("test-{}@integration.clementine.test", uuid::Uuid::new_v4())
}

/// Register a fresh user and leave the client logged in.
///
/// # Panics
///
/// Panics if the registration request fails or is not the expected
/// redirect to `/`.
pub async fn register_user(client: &Client, email: &str, password: &str) {
    let resp = client
        .post(format!("{}/register", base_url()))
        .form(&[("name", "Test User"), ("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to register test user");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), Some("/"));
}

/// Log in with existing credentials.
///
/// # Panics
///
/// Panics if the login request fails or does not redirect to `/`.
pub async fn login(client: &Client, email: &str, password: &str) {
    let resp = client
        .post(format!("{}/login", base_url()))
        .form(&[("email", email), ("password", password)])
        .send()
        .await
        .expect("Failed to log in");

    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), Some("/"));
}

/// The `Location` header of a redirect response.
#[must_use]
pub fn location(resp: &reqwest::Response) -> Option<&str> {
    resp.headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
