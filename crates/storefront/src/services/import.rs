//! Bulk product ingestion from the catalog feed.
//!
//! Fetches one feed category, deduplicates against the local catalog by
//! product name (case-insensitive), and creates the remaining items under
//! the admin-chosen internal category. The whole feed page is processed in
//! one request; there is no retry and no partial-failure recovery beyond
//! per-item reporting.

use rust_decimal::Decimal;
use sqlx::PgPool;
use thiserror::Error;

use clementine_core::{Category, Discount};

use crate::db::{ProductRepository, RepositoryError};
use crate::feed::{FeedClient, FeedError, FeedProduct};
use crate::models::NewProduct;

/// Errors that abort an import run.
///
/// Per-item problems (duplicate names, unmappable fields) do not abort the
/// run; they are reported in the [`ImportReport`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The feed fetch failed; nothing was imported.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Why a single feed item could not be mapped onto the local schema.
#[derive(Debug, Error, PartialEq)]
pub enum MapItemError {
    /// The price is not representable as a decimal.
    #[error("price {0} is not representable")]
    BadPrice(f64),

    /// The discount percentage maps outside (0, 1).
    #[error("discount percentage {0} is out of range")]
    BadDiscount(f64),

    /// The stock count is negative.
    #[error("stock {0} is negative")]
    BadStock(i32),
}

/// Per-item outcome of an import run, by product name.
#[derive(Debug, Default, Clone)]
pub struct ImportReport {
    /// Items created in the catalog.
    pub created: Vec<String>,
    /// Items skipped because a product with that name already exists.
    pub skipped: Vec<String>,
    /// Items whose feed fields could not be mapped.
    pub failed: Vec<String>,
}

/// Product ingestion service for the admin surface.
pub struct ImportService<'a> {
    products: ProductRepository<'a>,
    feed: &'a FeedClient,
}

impl<'a> ImportService<'a> {
    /// Create a new import service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, feed: &'a FeedClient) -> Self {
        Self {
            products: ProductRepository::new(pool),
            feed,
        }
    }

    /// Import every product the feed lists under `product_type`, assigning
    /// the given internal category.
    ///
    /// # Errors
    ///
    /// Returns `ImportError::Feed` if the fetch fails and
    /// `ImportError::Repository` on non-conflict database errors. A name
    /// conflict on insert counts as skipped, not as a failure: another
    /// request may have created the product between the check and the
    /// insert.
    pub async fn import_category(
        &self,
        product_type: &str,
        category: Category,
    ) -> Result<ImportReport, ImportError> {
        let items = self.feed.products_in_category(product_type).await?;
        tracing::info!(
            product_type,
            category = %category,
            count = items.len(),
            "Importing feed category"
        );

        let mut report = ImportReport::default();

        for item in items {
            if self.products.find_by_name(&item.title).await?.is_some() {
                report.skipped.push(item.title);
                continue;
            }

            let new = match map_feed_product(&item, category) {
                Ok(new) => new,
                Err(e) => {
                    tracing::warn!(title = %item.title, error = %e, "Skipping unmappable feed item");
                    report.failed.push(item.title);
                    continue;
                }
            };

            match self.products.insert(&new).await {
                Ok(product) => report.created.push(product.name),
                Err(RepositoryError::Conflict(_)) => report.skipped.push(new.name),
                Err(e) => return Err(e.into()),
            }
        }

        Ok(report)
    }
}

/// Map one feed item onto the local product schema.
///
/// The feed's own category is discarded in favor of the caller's; the
/// discount percentage becomes a fraction; the first gallery image becomes
/// the main image, with the thumbnail as fallback for image-less items.
pub fn map_feed_product(
    item: &FeedProduct,
    category: Category,
) -> Result<NewProduct, MapItemError> {
    let price =
        Decimal::from_f64_retain(item.price).ok_or(MapItemError::BadPrice(item.price))?;

    let percentage = Decimal::from_f64_retain(item.discount_percentage)
        .ok_or(MapItemError::BadDiscount(item.discount_percentage))?;
    let discount = Discount::from_percentage(percentage)
        .map_err(|_| MapItemError::BadDiscount(item.discount_percentage))?;

    if item.stock < 0 {
        return Err(MapItemError::BadStock(item.stock));
    }

    let image = item
        .images
        .first()
        .unwrap_or(&item.thumbnail)
        .clone();

    Ok(NewProduct {
        name: item.title.clone(),
        description: item.description.clone(),
        price,
        discount,
        thumbnail: item.thumbnail.clone(),
        image,
        category,
        stock: item.stock,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn feed_item() -> FeedProduct {
        FeedProduct {
            title: "Annibale Colombo Bed".to_string(),
            description: "Luxurious king size bed.".to_string(),
            price: 1899.99,
            discount_percentage: 12.5,
            thumbnail: "https://cdn.example.com/bed/thumb.webp".to_string(),
            images: vec![
                "https://cdn.example.com/bed/1.webp".to_string(),
                "https://cdn.example.com/bed/2.webp".to_string(),
            ],
            stock: 88,
        }
    }

    #[test]
    fn test_map_assigns_caller_category() {
        let new = map_feed_product(&feed_item(), Category::Home).unwrap();
        assert_eq!(new.category, Category::Home);
    }

    #[test]
    fn test_map_discount_percentage_becomes_fraction() {
        let new = map_feed_product(&feed_item(), Category::Home).unwrap();
        assert_eq!(new.discount.as_decimal(), Decimal::new(125, 3)); // 0.125
    }

    #[test]
    fn test_map_first_image_becomes_main_image() {
        let new = map_feed_product(&feed_item(), Category::Home).unwrap();
        assert_eq!(new.image, "https://cdn.example.com/bed/1.webp");
        assert_eq!(new.thumbnail, "https://cdn.example.com/bed/thumb.webp");
    }

    #[test]
    fn test_map_falls_back_to_thumbnail_without_images() {
        let mut item = feed_item();
        item.images.clear();
        let new = map_feed_product(&item, Category::Home).unwrap();
        assert_eq!(new.image, item.thumbnail);
    }

    #[test]
    fn test_map_rejects_out_of_range_discount() {
        let mut item = feed_item();
        item.discount_percentage = 0.0;
        assert_eq!(
            map_feed_product(&item, Category::Home).unwrap_err(),
            MapItemError::BadDiscount(0.0)
        );

        item.discount_percentage = 100.0;
        assert!(map_feed_product(&item, Category::Home).is_err());
    }

    #[test]
    fn test_map_rejects_negative_stock() {
        let mut item = feed_item();
        item.stock = -1;
        assert_eq!(
            map_feed_product(&item, Category::Home).unwrap_err(),
            MapItemError::BadStock(-1)
        );
    }
}
