//! Catalog API client implementation.
//!
//! Talks JSON over `reqwest` to a Fake Store compatible API and caches every
//! response using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use ekart_core::{CatalogItem, ProductId};

use super::CatalogError;
use super::cache::{CacheKey, CacheValue};
use crate::config::CatalogConfig;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product catalog API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<CacheKey, CacheValue>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                cache,
            }),
        }
    }

    /// Fetch a path and return the body of a successful response.
    async fn fetch(&self, path: &str) -> Result<String, CatalogError> {
        let url = format!("{}{path}", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(body)
    }

    /// Fetch a path and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, CatalogError> {
        let body = self.fetch(path).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List every product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<CatalogItem>, CatalogError> {
        let key = CacheKey::Products;

        if let Some(CacheValue::Products(items)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for products");
            return Ok(items);
        }

        let items: Vec<CatalogItem> = self.get_json("/products").await?;

        self.inner
            .cache
            .insert(key, CacheValue::Products(items.clone()))
            .await;

        Ok(items)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist, or an
    /// error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_by_id(&self, id: ProductId) -> Result<CatalogItem, CatalogError> {
        let key = CacheKey::Product(id);

        if let Some(CacheValue::Product(item)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for product");
            return Ok(*item);
        }

        let path = format!("/products/{id}");
        let body = self.fetch(&path).await?;

        // Unknown ids come back as 200 with an empty body.
        if body.trim().is_empty() || body.trim() == "null" {
            return Err(CatalogError::NotFound(format!("Product not found: {id}")));
        }

        let item: CatalogItem = serde_json::from_str(&body)?;

        self.inner
            .cache
            .insert(key, CacheValue::Product(Box::new(item.clone())))
            .await;

        Ok(item)
    }

    /// List category names.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<String>, CatalogError> {
        let key = CacheKey::Categories;

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<String> = self.get_json("/products/categories").await?;

        self.inner
            .cache
            .insert(key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// List the products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<CatalogItem>, CatalogError> {
        let key = CacheKey::Category(category.to_string());

        if let Some(CacheValue::Products(items)) = self.inner.cache.get(&key).await {
            debug!("Cache hit for category");
            return Ok(items);
        }

        let path = format!("/products/category/{}", urlencoding::encode(category));
        let items: Vec<CatalogItem> = self.get_json(&path).await?;

        self.inner
            .cache
            .insert(key, CacheValue::Products(items.clone()))
            .await;

        Ok(items)
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }
}
