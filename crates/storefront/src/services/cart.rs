//! Cart ledger.
//!
//! The ledger is the ordered list of items the shopper intends to buy. It
//! is unique by product id: adding an item that is already present raises
//! its quantity in place instead of appending a second entry.
//!
//! Each mutation builds the next ledger, writes it to storage, and only
//! then replaces the in-memory copy. If the write fails the ledger is left
//! exactly as it was, in memory and on disk.

use std::sync::Arc;

use tracing::instrument;

use ekart_core::{
    CatalogItem, LedgerEntry, OrderSummary, Price, ProductId, cart_total, item_count,
    order_summary,
};

use crate::models::session::keys;
use crate::services::notify::{Notification, Notifier};
use crate::storage::{self, Storage, StorageError};

/// The shopper's cart.
pub struct CartLedger {
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    entries: Vec<LedgerEntry>,
}

impl CartLedger {
    /// Initialize from storage.
    ///
    /// A corrupt cart record is discarded and the cart starts empty. Entries
    /// with a zero quantity are dropped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart record cannot be read.
    pub fn load(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let mut entries: Vec<LedgerEntry> =
            storage::load_or_discard(storage.as_ref(), keys::CART)?.unwrap_or_default();
        entries.retain(|entry| entry.quantity > 0);

        tracing::debug!(entries = entries.len(), "Cart loaded");

        Ok(Self {
            storage,
            notifier,
            entries,
        })
    }

    /// Entries in the order they were first added.
    #[must_use]
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// The entry for a product, if it is in the cart.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.item.id == id)
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        item_count(&self.entries)
    }

    /// Total price of the cart, in rupees.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        cart_total(&self.entries)
    }

    /// Subtotal, shipping, tax and payable total.
    #[must_use]
    pub fn order_summary(&self) -> OrderSummary {
        order_summary(&self.entries)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of an item.
    ///
    /// An item already in the cart keeps its position and has its quantity
    /// increased. A zero quantity changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self, item), fields(product_id = %item.id))]
    pub fn add_to_cart(&mut self, item: &CatalogItem, quantity: u32) -> Result<(), StorageError> {
        if quantity == 0 {
            tracing::debug!("Ignoring add with zero quantity");
            return Ok(());
        }

        let mut next = self.entries.clone();
        let notification = match next.iter_mut().find(|entry| entry.item.id == item.id) {
            Some(entry) => {
                entry.quantity = entry.quantity.saturating_add(quantity);
                Notification::new(
                    "Product updated in cart",
                    format!("{} quantity updated to {}", item.title, entry.quantity),
                )
            }
            None => {
                next.push(LedgerEntry::new(item.clone(), quantity));
                Notification::new(
                    "Product added to cart",
                    format!("{} added to your cart", item.title),
                )
            }
        };

        self.commit(next)?;
        self.notifier.notify(notification);
        Ok(())
    }

    /// Remove an item entirely. Removing an item that is not in the cart
    /// does nothing and sends no notification.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: ProductId) -> Result<(), StorageError> {
        let Some(removed) = self.get(id).map(|entry| entry.item.title.clone()) else {
            tracing::debug!("Product not in cart");
            return Ok(());
        };

        let next = self
            .entries
            .iter()
            .filter(|entry| entry.item.id != id)
            .cloned()
            .collect();

        self.commit(next)?;
        self.notifier.notify(Notification::new(
            "Product removed",
            format!("{removed} removed from cart"),
        ));
        Ok(())
    }

    /// Set an item's quantity to exactly `quantity`.
    ///
    /// Zero or a negative quantity removes the item. Items not in the cart
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) -> Result<(), StorageError> {
        if quantity <= 0 {
            return self.remove_from_cart(id);
        }
        if self.get(id).is_none() {
            return Ok(());
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut next = self.entries.clone();
        for entry in next.iter_mut().filter(|entry| entry.item.id == id) {
            entry.quantity = quantity;
        }

        self.commit(next)
    }

    /// Remove every item. Clearing an empty cart is allowed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<(), StorageError> {
        self.commit(Vec::new())?;
        self.notifier.notify(Notification::new(
            "Cart cleared",
            "All items have been removed from your cart",
        ));
        Ok(())
    }

    /// Persist `next` and make it the current ledger.
    fn commit(&mut self, next: Vec<LedgerEntry>) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), keys::CART, &next)?;
        self.entries = next;
        Ok(())
    }
}
