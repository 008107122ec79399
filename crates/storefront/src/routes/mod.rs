//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Catalog
//! GET  /                       - Homepage listing (products + deals)
//! GET  /{category}             - Category listing
//!
//! # Auth
//! GET  /register               - Registration page (queued notices)
//! POST /register               - Registration action
//! GET  /login                  - Login page (queued notices)
//! POST /login                  - Login action
//! GET  /logout                 - Logout action
//!
//! # Cart (requires login)
//! GET  /cart                   - View cart
//! GET  /cart-add               - Add one unit (?product_id=&discounted=)
//! GET  /cart-delete            - Remove one unit (?product_id=)
//!
//! # Admin (requires admin permission)
//! GET  /admin-panel            - Admin landing (drains notices)
//! GET  /add-product-manual     - Manual creation form choices
//! POST /add-product-manual     - Create one product
//! GET  /add-product-api        - Feed import form choices
//! POST /add-product-api        - Bulk import one feed category
//! ```
//!
//! HTML rendering is owned by a separate frontend; page handlers return
//! JSON and form actions answer with redirects, carrying user-facing
//! notices through the session flash queue.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::get,
};

use crate::error::AppError;
use crate::state::AppState;

/// Create all routes for the storefront.
///
/// The `/{category}` segment is registered last; static paths like `/cart`
/// take precedence over it in axum's router.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::home))
        // Auth
        .route("/register", get(auth::register_page).post(auth::register))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        // Cart
        .route("/cart", get(cart::show))
        .route("/cart-add", get(cart::add))
        .route("/cart-delete", get(cart::remove))
        // Admin
        .route("/admin-panel", get(admin::panel))
        .route(
            "/add-product-manual",
            get(admin::manual_form).post(admin::manual_submit),
        )
        .route(
            "/add-product-api",
            get(admin::feed_form).post(admin::feed_submit),
        )
        // Category catch-all
        .route("/{category}", get(home::category))
}

/// Map a session-store failure onto an internal error.
pub(crate) fn session_error(e: tower_sessions::session::Error) -> AppError {
    AppError::Internal(format!("session error: {e}"))
}
