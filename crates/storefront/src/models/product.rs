//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use clementine_core::{Category, Discount, ProductId};

/// A catalog product (domain type).
///
/// Stock is mutated only by the cart repository; everything else is set at
/// creation time by the admin surface.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name (unique across the catalog).
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Undiscounted price.
    pub price: Decimal,
    /// Discount fraction (0 < d < 1).
    pub discount: Discount,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Main image URL.
    pub image: String,
    /// Internal category label.
    pub category: Category,
    /// Available-to-sell count; reserved units live in cart lines.
    pub stock: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
}

/// Fields for a product about to be created.
///
/// Built either from the manual admin form or from a feed item; see
/// [`crate::services::import`] for the feed mapping.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount: Discount,
    pub thumbnail: String,
    pub image: String,
    pub category: Category,
    pub stock: i32,
}
