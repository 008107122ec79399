//! Admin route handlers.
//!
//! Product creation, manual and feed-driven. Every handler requires the
//! admin permission; anonymous and non-admin callers get 403.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use clementine_core::{Category, Discount};

use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::middleware::auth::RequireAdmin;
use crate::middleware::{push_notice, take_notices};
use crate::models::NewProduct;
use crate::routes::session_error;
use crate::services::import::ImportService;
use crate::state::AppState;

/// Feed category slugs and the internal category each maps onto.
///
/// Served to the import form so the admin picks a slug the feed actually
/// publishes; the internal category is a suggestion, the form may override.
const FEED_CATEGORIES: &[(&str, Category)] = &[
    ("beauty", Category::Beauty),
    ("fragrances", Category::Beauty),
    ("skin-care", Category::Beauty),
    ("furniture", Category::Home),
    ("home-decoration", Category::Home),
    ("kitchen-accessories", Category::Home),
    ("laptops", Category::Electronics),
    ("mobile-accessories", Category::Electronics),
    ("smartphones", Category::Electronics),
    ("tablets", Category::Electronics),
    ("mens-shirts", Category::Fashion),
    ("mens-shoes", Category::Fashion),
    ("mens-watches", Category::Fashion),
    ("sports-accessories", Category::Fashion),
    ("sunglasses", Category::Fashion),
    ("tops", Category::Fashion),
    ("womens-bags", Category::Fashion),
    ("womens-dresses", Category::Fashion),
    ("womens-jewellery", Category::Fashion),
    ("womens-shoes", Category::Fashion),
];

// =============================================================================
// Page Types
// =============================================================================

/// Admin landing payload: the queued notices.
#[derive(Debug, Serialize)]
pub struct AdminPanel {
    pub notices: Vec<String>,
}

/// A category choice for the manual form.
#[derive(Debug, Serialize)]
pub struct CategoryChoice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Manual creation form payload.
#[derive(Debug, Serialize)]
pub struct ManualFormPage {
    pub categories: Vec<CategoryChoice>,
    pub notices: Vec<String>,
}

/// A feed slug choice for the import form.
#[derive(Debug, Serialize)]
pub struct FeedCategoryChoice {
    pub product_type: &'static str,
    pub category: Category,
}

/// Feed import form payload.
#[derive(Debug, Serialize)]
pub struct FeedFormPage {
    pub feed_categories: Vec<FeedCategoryChoice>,
    pub notices: Vec<String>,
}

// =============================================================================
// Form Types
// =============================================================================

/// Manual product creation form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount: Decimal,
    pub thumbnail: String,
    pub image: String,
    pub category: String,
    pub stock: i32,
}

/// Feed import form data.
#[derive(Debug, Deserialize)]
pub struct FeedImportForm {
    pub product_type: String,
    pub category: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Admin landing page.
pub async fn panel(RequireAdmin(_admin): RequireAdmin, session: Session) -> Json<AdminPanel> {
    Json(AdminPanel {
        notices: take_notices(&session).await,
    })
}

/// Manual creation form: the category choices.
pub async fn manual_form(
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
) -> Json<ManualFormPage> {
    Json(ManualFormPage {
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryChoice {
                value: c.as_str(),
                label: c.label(),
            })
            .collect(),
        notices: take_notices(&session).await,
    })
}

/// Create one product from the manual form.
///
/// The name is normalized to title case before storage; duplicate names
/// (case-insensitive) queue a notice and mutate nothing.
pub async fn manual_submit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response, AppError> {
    let category: Category = form
        .category
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown category: {}", form.category)))?;

    let discount = Discount::new(form.discount)
        .map_err(|_| AppError::BadRequest("Discount must be between 0.01 and 0.99".to_string()))?;

    if form.stock < 0 {
        return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
    }

    let products = ProductRepository::new(state.pool());
    let name = title_case(&form.name);

    if let Some(existing) = products.find_by_name(&name).await? {
        push_notice(&session, format!("{} already exists, please try again.", existing.name))
            .await
            .map_err(session_error)?;
        return Ok(Redirect::to("/add-product-manual").into_response());
    }

    let new = NewProduct {
        name: name.clone(),
        description: form.description,
        price: form.price,
        discount,
        thumbnail: form.thumbnail,
        image: form.image,
        category,
        stock: form.stock,
    };

    match products.insert(&new).await {
        Ok(product) => {
            tracing::info!(admin_id = %admin.id, product_id = %product.id, "Product created manually");
            push_notice(&session, format!("{} successfully added!", product.name))
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/admin-panel").into_response())
        }
        // The duplicate check raced with another insert
        Err(RepositoryError::Conflict(_)) => {
            push_notice(&session, format!("{name} already exists, please try again."))
                .await
                .map_err(session_error)?;
            Ok(Redirect::to("/add-product-manual").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

/// Feed import form: the slug-to-category mapping table.
pub async fn feed_form(
    RequireAdmin(_admin): RequireAdmin,
    session: Session,
) -> Json<FeedFormPage> {
    Json(FeedFormPage {
        feed_categories: FEED_CATEGORIES
            .iter()
            .map(|&(product_type, category)| FeedCategoryChoice {
                product_type,
                category,
            })
            .collect(),
        notices: take_notices(&session).await,
    })
}

/// Bulk import one feed category.
///
/// Every item is processed: created, skipped as duplicate, or reported
/// unmappable - each with its own notice on the admin panel.
pub async fn feed_submit(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    session: Session,
    Form(form): Form<FeedImportForm>,
) -> Result<Response, AppError> {
    if !FEED_CATEGORIES
        .iter()
        .any(|&(slug, _)| slug == form.product_type)
    {
        return Err(AppError::BadRequest(format!(
            "unknown feed product type: {}",
            form.product_type
        )));
    }

    let category: Category = form
        .category
        .parse()
        .map_err(|_| AppError::BadRequest(format!("unknown category: {}", form.category)))?;

    let importer = ImportService::new(state.pool(), state.feed());
    let report = importer.import_category(&form.product_type, category).await?;

    tracing::info!(
        admin_id = %admin.id,
        product_type = %form.product_type,
        created = report.created.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        "Feed import finished"
    );

    for name in &report.skipped {
        push_notice(&session, format!("{name} already exists."))
            .await
            .map_err(session_error)?;
    }
    for name in &report.failed {
        push_notice(&session, format!("{name} could not be imported."))
            .await
            .map_err(session_error)?;
    }
    for name in &report.created {
        push_notice(&session, format!("{name} successfully added!"))
            .await
            .map_err(session_error)?;
    }

    Ok(Redirect::to("/admin-panel").into_response())
}

/// Normalize a product name to title case.
///
/// Every alphabetic run starts uppercase and continues lowercase; anything
/// else (spaces, digits, punctuation) starts a new run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case_basic() {
        assert_eq!(title_case("wireless mouse"), "Wireless Mouse");
        assert_eq!(title_case("WIRELESS MOUSE"), "Wireless Mouse");
    }

    #[test]
    fn test_title_case_punctuation_starts_new_word() {
        assert_eq!(title_case("mother's day mug"), "Mother'S Day Mug");
        assert_eq!(title_case("usb-c cable"), "Usb-C Cable");
    }

    #[test]
    fn test_title_case_digits() {
        assert_eq!(title_case("mk2 keyboard"), "Mk2 Keyboard");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_feed_categories_map_onto_known_labels() {
        // Every suggested category must parse back from its label.
        for &(slug, category) in FEED_CATEGORIES {
            assert!(!slug.is_empty());
            let parsed: Category = category.as_str().parse().expect("valid label");
            assert_eq!(parsed, category);
        }
    }
}
