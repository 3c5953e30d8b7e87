//! Integration tests for eKart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ekart-integration-tests
//! ```
//!
//! Every test gets its own data directory. "Restarting" the storefront
//! means building a fresh [`Storefront`] over the same directory, which is
//! what a new CLI process does.
//!
//! # Test Categories
//!
//! - `persistence` - State surviving restarts, corrupt and missing records
//! - `checkout` - Browse, add to cart and place an order against a mock catalog

use std::path::Path;
use std::sync::Arc;

use ekart_storefront::config::StorefrontConfig;
use ekart_storefront::services::notify::RecordingNotifier;
use ekart_storefront::state::Storefront;
use tempfile::TempDir;

/// A data directory plus the settings a test storefront runs with.
pub struct TestContext {
    pub data_dir: TempDir,
    pub catalog_url: String,
}

impl TestContext {
    /// A context whose catalog points at `catalog_url`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new(catalog_url: impl Into<String>) -> Self {
        Self {
            data_dir: tempfile::tempdir().unwrap(),
            catalog_url: catalog_url.into(),
        }
    }

    /// The directory state is persisted in.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Configuration with no checkout delay.
    ///
    /// # Panics
    ///
    /// Panics if the catalog URL is invalid.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn config(&self) -> StorefrontConfig {
        let data_dir = self.path().to_string_lossy().into_owned();
        let catalog_url = self.catalog_url.clone();
        StorefrontConfig::from_lookup(&move |key: &str| match key {
            "EKART_DATA_DIR" => Some(data_dir.clone()),
            "EKART_CATALOG_URL" => Some(catalog_url.clone()),
            "EKART_CHECKOUT_DELAY_MS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap()
    }

    /// Start a storefront over the context's data directory.
    ///
    /// # Panics
    ///
    /// Panics if persisted state cannot be read.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn start(&self) -> (Storefront, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store = Storefront::new(self.config(), notifier.clone()).unwrap();
        (store, notifier)
    }
}
