//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices arrive in US dollars. Everything shown to the shopper,
//! including the cart total, is in Indian rupees at a fixed rate of
//! [`USD_TO_INR`], applied uniformly to every price.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed USD to INR conversion factor.
pub const USD_TO_INR: Decimal = Decimal::from_parts(83, 0, 0, false, 0);

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// A price in US dollars, as quoted by the catalog.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero amount in rupees.
    #[must_use]
    pub const fn zero_inr() -> Self {
        Self::new(Decimal::ZERO, CurrencyCode::INR)
    }

    /// Convert to rupees. Rupee prices are returned unchanged.
    ///
    /// Saturates at [`Decimal::MAX`] rather than overflowing.
    #[must_use]
    pub fn to_inr(self) -> Self {
        match self.currency_code {
            CurrencyCode::INR => self,
            CurrencyCode::USD => {
                Self::new(self.amount.saturating_mul(USD_TO_INR), CurrencyCode::INR)
            }
        }
    }

    /// Format for display with two decimal places (e.g., "₹1660.00").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::INR => "₹",
            Self::USD => "$",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_converts_at_fixed_rate() {
        let price = Price::usd(Decimal::new(1099, 2)).to_inr();
        assert_eq!(price.currency_code, CurrencyCode::INR);
        assert_eq!(price.amount, Decimal::new(91217, 2));
    }

    #[test]
    fn test_inr_is_not_converted_twice() {
        let price = Price::new(Decimal::from(830), CurrencyCode::INR);
        assert_eq!(price.to_inr(), price);
    }

    #[test]
    fn test_display_rounds_to_two_places() {
        assert_eq!(Price::usd(Decimal::from(10)).to_inr().display(), "₹830.00");
        assert_eq!(
            Price::usd(Decimal::new(10995, 2)).to_inr().display(),
            "₹9125.85"
        );
        assert_eq!(Price::usd(Decimal::new(5, 1)).display(), "$0.50");
    }
}
