//! Homepage and category listing route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use clementine_core::Category;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::models::Product;
use crate::state::AppState;

/// How many in-stock products the homepage samples.
const HOME_SAMPLE_LIMIT: i64 = 10;

/// How many of the sampled products lead the page; the rest are deals.
const HOME_FEATURED_COUNT: usize = 6;

/// How many in-stock products a category page samples.
const CATEGORY_SAMPLE_LIMIT: i64 = 8;

/// Homepage payload.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub products: Vec<Product>,
    pub deals: Vec<Product>,
}

/// Category page payload.
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub category: Category,
    pub products: Vec<Product>,
}

/// Homepage listing: up to 10 in-stock products, sampled fresh per request.
pub async fn home(State(state): State<AppState>) -> Result<Json<HomePage>, AppError> {
    let sampled = ProductRepository::new(state.pool())
        .sample_in_stock(HOME_SAMPLE_LIMIT)
        .await?;

    let (products, deals) = split_featured(sampled);
    Ok(Json(HomePage { products, deals }))
}

/// Category listing: up to 8 in-stock products of one category.
///
/// Unknown category labels are a client error, not a server fault.
pub async fn category(
    State(state): State<AppState>,
    Path(label): Path<String>,
) -> Result<Json<CategoryPage>, AppError> {
    let category: Category = label
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown category: {label}")))?;

    let products = ProductRepository::new(state.pool())
        .sample_in_stock_by_category(category, CATEGORY_SAMPLE_LIMIT)
        .await?;

    Ok(Json(CategoryPage { category, products }))
}

/// Split a homepage sample into featured products and deals.
fn split_featured(mut products: Vec<Product>) -> (Vec<Product>, Vec<Product>) {
    let split_at = products.len().min(HOME_FEATURED_COUNT);
    let deals = products.split_off(split_at);
    (products, deals)
}
