//! Product catalog access.
//!
//! # Architecture
//!
//! - The remote catalog is the source of truth; nothing is synced locally
//! - In-memory caching via `moka` for API responses
//! - Search runs over an already fetched product list
//!
//! # Example
//!
//! ```rust,ignore
//! use ekart_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let items = client.list_all().await?;
//! let hits = catalog::search(&items, "backpack");
//! ```

mod cache;
mod client;
pub mod search;

pub use client::CatalogClient;
pub use search::{results_label, search};

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with an unexpected status.
    #[error("Unexpected status {status} from {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path.
        path: String,
    },
}
