//! Cart domain types.

use serde::Serialize;

use crate::models::Product;

/// One line of a user's cart, joined with its product.
///
/// The underlying row is keyed by (user, product); the user is implicit
/// because cart lines are only ever read for the session's own user.
#[derive(Debug, Clone, Serialize)]
pub struct CartItem {
    /// The reserved product.
    pub product: Product,
    /// Units reserved from stock.
    pub quantity: i32,
    /// Whether the line was added at the discounted price.
    pub discounted: bool,
}
