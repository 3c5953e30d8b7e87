//! Core types for eKart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod product;

pub use cart::{LedgerEntry, OrderSummary, TAX_RATE, cart_total, item_count, order_summary};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, USD_TO_INR};
pub use product::{CatalogItem, Rating};
