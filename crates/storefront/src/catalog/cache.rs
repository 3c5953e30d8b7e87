//! Cache types for catalog API responses.

use ekart_core::{CatalogItem, ProductId};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Product(ProductId),
    Categories,
    Category(String),
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<CatalogItem>),
    Product(Box<CatalogItem>),
    Categories(Vec<String>),
}
