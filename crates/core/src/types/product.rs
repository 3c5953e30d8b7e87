//! Catalog item types.
//!
//! These mirror the product records served by the catalog API. They are
//! read-only from the point of view of the cart and session state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Catalog product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price in US dollars.
    pub price: Decimal,
    /// Category name (e.g., "electronics").
    pub category: String,
    /// Long-form description.
    pub description: String,
    /// Image URL.
    pub image: String,
    /// Aggregate review rating, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl CatalogItem {
    /// Unit price converted for display.
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::usd(self.price).to_inr()
    }
}

/// Product rating summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Average rating value (e.g., 4.5).
    pub rate: f64,
    /// Total number of reviews.
    pub count: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_payload() {
        let json = r#"{
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack",
            "price": 109.95,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        }"#;

        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, ProductId::new(1));
        assert_eq!(item.price, Decimal::new(10995, 2));
        assert_eq!(item.rating.unwrap().count, 120);
        assert_eq!(item.unit_price().display(), "₹9125.85");
    }

    #[test]
    fn test_rating_is_optional() {
        let json = r#"{
            "id": 2, "title": "Mug", "price": 5, "description": "",
            "category": "kitchen", "image": ""
        }"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert!(item.rating.is_none());
        assert!(!serde_json::to_string(&item).unwrap().contains("rating"));
    }
}
