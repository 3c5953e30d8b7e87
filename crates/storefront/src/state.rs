//! Storefront state shared by front-ends.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::services::auth::SessionStore;
use crate::services::cart::CartLedger;
use crate::services::checkout::{Checkout, CheckoutError, OrderReceipt, OrderRequest};
use crate::services::notify::Notifier;
use crate::storage::{FileStorage, Storage, StorageError};

/// The session, the cart, and the services that act on them.
///
/// Both state containers are restored from storage on construction, so a
/// new `Storefront` over the same storage resumes where the last one left
/// off.
pub struct Storefront {
    config: StorefrontConfig,
    session: SessionStore,
    cart: CartLedger,
    catalog: CatalogClient,
    checkout: Checkout,
}

impl Storefront {
    /// Create a storefront persisting to files in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisted state cannot be read.
    pub fn new(config: StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self, StorageError> {
        let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
        Self::with_storage(config, storage, notifier)
    }

    /// Create a storefront over an arbitrary storage backend.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if persisted state cannot be read.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let session = SessionStore::load(Arc::clone(&storage), Arc::clone(&notifier))?;
        let cart = CartLedger::load(storage, Arc::clone(&notifier))?;
        let catalog = CatalogClient::new(&config.catalog);
        let checkout = Checkout::new(config.checkout_delay, notifier);

        tracing::debug!(
            authenticated = session.is_authenticated(),
            cart_items = cart.item_count(),
            "Storefront state restored"
        );

        Ok(Self {
            config,
            session,
            cart,
            catalog,
            checkout,
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the session store.
    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Get a mutable reference to the session store.
    pub const fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Get a reference to the cart ledger.
    #[must_use]
    pub const fn cart(&self) -> &CartLedger {
        &self.cart
    }

    /// Get a mutable reference to the cart ledger.
    pub const fn cart_mut(&mut self) -> &mut CartLedger {
        &mut self.cart
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Get a reference to the checkout service.
    #[must_use]
    pub const fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Place an order for the current cart.
    ///
    /// # Errors
    ///
    /// See [`Checkout::place_order`].
    pub async fn place_order(&mut self, request: &OrderRequest) -> Result<OrderReceipt, CheckoutError> {
        self.checkout
            .place_order(&self.session, &mut self.cart, request)
            .await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::notify::RecordingNotifier;
    use crate::storage::MemoryStorage;
    use ekart_core::{CatalogItem, ProductId};
    use rust_decimal::Decimal;

    fn config() -> StorefrontConfig {
        StorefrontConfig::from_lookup(&|key: &str| {
            (key == "EKART_CHECKOUT_DELAY_MS").then(|| "0".to_string())
        })
        .unwrap()
    }

    fn item(id: i64) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            title: "Mug".to_string(),
            price: Decimal::new(250, 2),
            category: "kitchen".to_string(),
            description: String::new(),
            image: String::new(),
            rating: None,
        }
    }

    #[test]
    fn test_state_survives_reconstruction() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::new());

        let mut first =
            Storefront::with_storage(config(), Arc::clone(&storage), notifier.clone()).unwrap();
        assert!(first.session_mut().signup(
            "Ravi",
            "ravi@example.com",
            &secrecy::SecretString::from("pw".to_string())
        ));
        first.cart_mut().add_to_cart(&item(4), 3).unwrap();
        drop(first);

        let second = Storefront::with_storage(config(), storage, notifier).unwrap();
        assert_eq!(second.session().current().unwrap().name, "Ravi");
        assert_eq!(second.cart().item_count(), 3);
        assert_eq!(second.cart().cart_total().display(), "₹622.50");
    }

    #[test]
    fn test_checkout_uses_configured_delay() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let store =
            Storefront::with_storage(config(), storage, Arc::new(RecordingNotifier::new())).unwrap();
        assert!(store.checkout().delay().is_zero());
    }
}
