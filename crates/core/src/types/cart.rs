//! Cart ledger records and their derived aggregates.
//!
//! The aggregates are pure functions of the entry sequence. Nothing caches
//! them, so they can never drift from the ledger they describe.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::price::{CurrencyCode, Price, USD_TO_INR};
use super::product::CatalogItem;

/// A catalog item selected for purchase, with its quantity.
///
/// Serialized flat: the catalog fields plus a `quantity` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// The selected catalog item.
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Number of units, always at least 1.
    pub quantity: u32,
}

impl LedgerEntry {
    /// Create an entry for an item.
    #[must_use]
    pub const fn new(item: CatalogItem, quantity: u32) -> Self {
        Self { item, quantity }
    }

    /// Price of this line (unit price × quantity), in rupees.
    ///
    /// Absurd catalog prices saturate at [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(
            self.item
                .price
                .saturating_mul(USD_TO_INR)
                .saturating_mul(Decimal::from(self.quantity)),
            CurrencyCode::INR,
        )
    }
}

/// Total number of units across all entries.
#[must_use]
pub fn item_count(entries: &[LedgerEntry]) -> u32 {
    entries
        .iter()
        .fold(0u32, |sum, entry| sum.saturating_add(entry.quantity))
}

/// Sum of every line total, in rupees.
#[must_use]
pub fn cart_total(entries: &[LedgerEntry]) -> Price {
    let amount = entries
        .iter()
        .map(|entry| entry.line_total().amount)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    Price::new(amount, CurrencyCode::INR)
}

/// Sales tax charged on the subtotal, as a fraction.
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// The amounts shown before payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    /// Sum of the line totals.
    pub subtotal: Price,
    /// Shipping is free.
    pub shipping: Price,
    /// [`TAX_RATE`] of the subtotal.
    pub tax: Price,
    /// What the shopper pays.
    pub total: Price,
}

/// Subtotal, shipping, tax and payable total for a ledger.
#[must_use]
pub fn order_summary(entries: &[LedgerEntry]) -> OrderSummary {
    let subtotal = cart_total(entries);
    let tax = subtotal.amount.saturating_mul(TAX_RATE);
    OrderSummary {
        shipping: Price::zero_inr(),
        tax: Price::new(tax, CurrencyCode::INR),
        total: Price::new(subtotal.amount.saturating_add(tax), CurrencyCode::INR),
        subtotal,
    }
}
