//! Cart repository: stock bookkeeping for reserved units.
//!
//! Cart lines and the product stock counter move together: every unit in a
//! cart line is a unit subtracted from `products.stock`. Both add and
//! remove run inside a single transaction so a line update can never land
//! without its matching stock change.

use sqlx::PgPool;

use clementine_core::{ProductId, UserId};

use super::RepositoryError;
use crate::models::CartItem;

/// Result of an add-to-cart attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A unit was reserved; the line now holds `quantity` units.
    Added { quantity: i32 },
    /// The product has no stock left; nothing was mutated.
    OutOfStock,
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Reserve one unit of a product into the user's cart.
    ///
    /// The stock decrement is guarded (`WHERE stock > 0`), so two
    /// concurrent adds for the last unit cannot both succeed. When the
    /// guard matches, the cart line is upserted in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
        discounted: bool,
    ) -> Result<AddOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let reserved = sqlx::query("UPDATE products SET stock = stock - 1 WHERE id = $1 AND stock > 0")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        if reserved.rows_affected() == 0 {
            // Distinguish "out of stock" from "no such product".
            let exists = sqlx::query_scalar::<_, i32>("SELECT 1 FROM products WHERE id = $1")
                .bind(product_id)
                .fetch_optional(&mut *tx)
                .await?;
            tx.rollback().await?;

            return if exists.is_some() {
                Ok(AddOutcome::OutOfStock)
            } else {
                Err(RepositoryError::NotFound)
            };
        }

        let quantity = sqlx::query_scalar::<_, i32>(
            "INSERT INTO carts (user_id, product_id, discounted, quantity) \
             VALUES ($1, $2, $3, 1) \
             ON CONFLICT (user_id, product_id) \
             DO UPDATE SET quantity = carts.quantity + 1 \
             RETURNING quantity",
        )
        .bind(user_id)
        .bind(product_id)
        .bind(discounted)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AddOutcome::Added { quantity })
    }

    /// Release one unit of a product from the user's cart back to stock.
    ///
    /// Deletes the line when its last unit is released. Returns the
    /// quantity remaining on the line (0 when the line was deleted).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the user has no cart line for
    /// the product.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<i32, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let quantity = sqlx::query_scalar::<_, i32>(
            "SELECT quantity FROM carts WHERE user_id = $1 AND product_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(quantity) = quantity else {
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        };

        if quantity == 1 {
            sqlx::query("DELETE FROM carts WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .execute(&mut *tx)
                .await?;
        } else {
            sqlx::query(
                "UPDATE carts SET quantity = quantity - 1 \
                 WHERE user_id = $1 AND product_id = $2",
            )
            .bind(user_id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE products SET stock = stock + 1 WHERE id = $1")
            .bind(product_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(quantity - 1)
    }

    /// List the user's cart as (product, quantity) pairs.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn items_for_user(&self, user_id: UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT p.id, p.name, p.description, p.price, p.discount, p.thumbnail, \
                    p.image, p.category, p.stock, p.created_at, \
                    c.quantity, c.discounted \
             FROM carts c \
             JOIN products p ON p.id = c.product_id \
             WHERE c.user_id = $1 \
             ORDER BY p.name",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| CartItem {
                product: r.product,
                quantity: r.quantity,
                discounted: r.discounted,
            })
            .collect())
    }
}

/// Row shape for [`CartRepository::items_for_user`].
#[derive(sqlx::FromRow)]
struct CartItemRow {
    #[sqlx(flatten)]
    product: crate::models::Product,
    quantity: i32,
    discounted: bool,
}
