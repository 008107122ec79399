//! Clementine Core - Shared types library.
//!
//! This crate provides common types used across all Clementine Market
//! components:
//! - `storefront` - The public storefront and its admin surface
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, permissions,
//!   categories, and discounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
