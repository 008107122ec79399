//! Wire types for the third-party catalog feed.

use serde::Deserialize;

/// Response envelope for `GET /products/category/{type}`.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedCategoryResponse {
    pub products: Vec<FeedProduct>,
}

/// One product record as the feed publishes it.
///
/// The feed reports the discount as a percentage and images as a list;
/// [`crate::services::import`] owns the mapping onto the local schema.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedProduct {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "products": [
            {
                "id": 11,
                "title": "Annibale Colombo Bed",
                "description": "Luxurious king size bed.",
                "category": "furniture",
                "price": 1899.99,
                "discountPercentage": 8.15,
                "stock": 88,
                "thumbnail": "https://cdn.example.com/bed/thumb.webp",
                "images": [
                    "https://cdn.example.com/bed/1.webp",
                    "https://cdn.example.com/bed/2.webp"
                ]
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_category_response() {
        let response: FeedCategoryResponse = serde_json::from_str(SAMPLE).unwrap();
        let product = response.products.first().unwrap();
        assert_eq!(product.title, "Annibale Colombo Bed");
        assert!((product.discount_percentage - 8.15).abs() < f64::EPSILON);
        assert_eq!(product.stock, 88);
        assert_eq!(product.images.len(), 2);
    }

    #[test]
    fn test_images_default_to_empty() {
        let json = r#"{
            "title": "Bare",
            "description": "No images field.",
            "price": 5.0,
            "discountPercentage": 10.0,
            "thumbnail": "https://cdn.example.com/bare.webp",
            "stock": 1
        }"#;
        let product: FeedProduct = serde_json::from_str(json).unwrap();
        assert!(product.images.is_empty());
    }
}
