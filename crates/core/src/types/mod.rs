//! Core types for Clementine Market.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod discount;
pub mod email;
pub mod id;
pub mod permission;

pub use category::{Category, ParseCategoryError};
pub use discount::{Discount, DiscountError};
pub use email::{Email, EmailError};
pub use id::*;
pub use permission::{ParsePermissionError, Permission};
