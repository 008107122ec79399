//! Discount fraction type.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Discount`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum DiscountError {
    /// The fraction is not strictly between 0 and 1.
    #[error("discount must be strictly between 0 and 1, got {0}")]
    OutOfRange(Decimal),
}

/// A discount expressed as a fraction of the price.
///
/// The invariant is `0 < d < 1`: a product is either discounted by some
/// fraction or carries no discount row at all. A 100% discount is a data
/// entry error, not a sale.
///
/// ## Examples
///
/// ```
/// use clementine_core::Discount;
/// use rust_decimal::Decimal;
///
/// let d = Discount::new(Decimal::new(15, 2)).unwrap(); // 0.15
/// assert_eq!(d.as_decimal(), Decimal::new(15, 2));
///
/// assert!(Discount::new(Decimal::ZERO).is_err());
/// assert!(Discount::new(Decimal::ONE).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discount(Decimal);

impl Discount {
    /// Create a `Discount` from a fraction.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] unless `0 < fraction < 1`.
    pub fn new(fraction: Decimal) -> Result<Self, DiscountError> {
        if fraction <= Decimal::ZERO || fraction >= Decimal::ONE {
            return Err(DiscountError::OutOfRange(fraction));
        }
        Ok(Self(fraction))
    }

    /// Create a `Discount` from a percentage (e.g. `12.5` becomes `0.125`).
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::OutOfRange`] unless the resulting fraction
    /// lies strictly between 0 and 1.
    pub fn from_percentage(percentage: Decimal) -> Result<Self, DiscountError> {
        Self::new(percentage / Decimal::ONE_HUNDRED)
    }

    /// The underlying fraction.
    #[must_use]
    pub const fn as_decimal(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Discount {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Discount {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let fraction = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(fraction))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Discount {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_in_range() {
        assert!(Discount::new(Decimal::new(1, 2)).is_ok()); // 0.01
        assert!(Discount::new(Decimal::new(99, 2)).is_ok()); // 0.99
    }

    #[test]
    fn test_new_rejects_bounds() {
        assert!(Discount::new(Decimal::ZERO).is_err());
        assert!(Discount::new(Decimal::ONE).is_err());
        assert!(Discount::new(Decimal::new(-5, 2)).is_err());
        assert!(Discount::new(Decimal::new(150, 2)).is_err());
    }

    #[test]
    fn test_from_percentage() {
        let d = Discount::from_percentage(Decimal::new(125, 1)).unwrap(); // 12.5%
        assert_eq!(d.as_decimal(), Decimal::new(125, 3)); // 0.125
    }

    #[test]
    fn test_from_percentage_rejects_zero_and_hundred() {
        assert!(Discount::from_percentage(Decimal::ZERO).is_err());
        assert!(Discount::from_percentage(Decimal::ONE_HUNDRED).is_err());
    }
}
