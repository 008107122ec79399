//! Cart route handlers.
//!
//! All three handlers require a logged-in user. Mutations redirect back to
//! the cart page; an out-of-stock add queues a notice instead of mutating.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use clementine_core::ProductId;

use crate::db::{AddOutcome, CartRepository, RepositoryError};
use crate::error::{AppError, add_breadcrumb};
use crate::middleware::auth::RequireUser;
use crate::middleware::{push_notice, take_notices};
use crate::models::CartItem;
use crate::routes::session_error;
use crate::state::AppState;

/// Notice shown when adding a product with no stock left.
const NOTICE_OUT_OF_STOCK: &str = "You cannot add to cart, currently out of stock.";

/// Query parameters for adding one unit.
#[derive(Debug, Deserialize)]
pub struct AddParams {
    pub product_id: i32,
    /// Presence of a non-empty value marks the line as discounted.
    pub discounted: Option<String>,
}

/// Query parameters for removing one unit.
#[derive(Debug, Deserialize)]
pub struct RemoveParams {
    pub product_id: i32,
}

/// Cart page payload.
#[derive(Debug, Serialize)]
pub struct CartPage {
    pub items: Vec<CartItem>,
    pub notices: Vec<String>,
}

/// View the current user's cart.
pub async fn show(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    session: Session,
) -> Result<Json<CartPage>, AppError> {
    let items = CartRepository::new(state.pool())
        .items_for_user(user.id)
        .await?;

    Ok(Json(CartPage {
        items,
        notices: take_notices(&session).await,
    }))
}

/// Reserve one unit of a product into the cart.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    session: Session,
    Query(params): Query<AddParams>,
) -> Result<Response, AppError> {
    let product_id = ProductId::new(params.product_id);
    let discounted = params.discounted.as_deref().is_some_and(|s| !s.is_empty());

    match CartRepository::new(state.pool())
        .add_item(user.id, product_id, discounted)
        .await
    {
        Ok(AddOutcome::Added { quantity }) => {
            add_breadcrumb(
                "cart",
                "Added product to cart",
                Some(&[("product_id", &product_id.to_string())]),
            );
            tracing::debug!(user_id = %user.id, %product_id, quantity, "Cart add");
        }
        Ok(AddOutcome::OutOfStock) => {
            push_notice(&session, NOTICE_OUT_OF_STOCK)
                .await
                .map_err(session_error)?;
        }
        Err(RepositoryError::NotFound) => {
            return Err(AppError::NotFound(format!("product {product_id}")));
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/cart").into_response())
}

/// Release one unit of a product from the cart back to stock.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    Query(params): Query<RemoveParams>,
) -> Result<Response, AppError> {
    let product_id = ProductId::new(params.product_id);

    match CartRepository::new(state.pool())
        .remove_item(user.id, product_id)
        .await
    {
        Ok(remaining) => {
            add_breadcrumb(
                "cart",
                "Removed product from cart",
                Some(&[("product_id", &product_id.to_string())]),
            );
            tracing::debug!(user_id = %user.id, %product_id, remaining, "Cart remove");
            Ok(Redirect::to("/cart").into_response())
        }
        Err(RepositoryError::NotFound) => Err(AppError::NotFound(format!(
            "no cart line for product {product_id}"
        ))),
        Err(e) => Err(e.into()),
    }
}
