//! Order placement.
//!
//! There is no payment processor. Placing an order checks that the shopper
//! is signed in and has something in the cart, validates the form, waits a
//! short processing delay, and then empties the cart.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;

use ekart_core::OrderSummary;

use crate::models::Session;
use crate::services::auth::SessionStore;
use crate::services::cart::CartLedger;
use crate::services::notify::{Notification, Notifier};
use crate::storage::StorageError;

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No user is signed in.
    #[error("login required")]
    LoginRequired,

    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// A required form field is blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The cart could not be cleared after the order was accepted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Where the order is shipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingDetails {
    pub name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
}

impl ShippingDetails {
    /// A blank form with name and email taken from the signed-in user.
    #[must_use]
    pub fn for_session(session: Option<&Session>) -> Self {
        session.map_or_else(Self::default, |session| Self {
            name: session.name.clone(),
            email: session.email.to_string(),
            ..Self::default()
        })
    }

    fn missing_field(&self) -> Option<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("pincode", &self.pincode),
            ("phone", &self.phone),
        ]
        .into_iter()
        .find_map(|(field, value)| value.trim().is_empty().then_some(field))
    }
}

/// Card details. Never stored and never logged.
#[derive(Clone)]
pub struct PaymentDetails {
    pub card_number: SecretString,
    pub card_name: String,
    pub expiry: String,
    pub cvv: SecretString,
}

impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("card_number", &"[REDACTED]")
            .field("card_name", &self.card_name)
            .field("expiry", &self.expiry)
            .field("cvv", &"[REDACTED]")
            .finish()
    }
}

impl PaymentDetails {
    fn missing_field(&self) -> Option<&'static str> {
        [
            ("card_number", self.card_number.expose_secret()),
            ("card_name", self.card_name.as_str()),
            ("expiry", self.expiry.as_str()),
            ("cvv", self.cvv.expose_secret()),
        ]
        .into_iter()
        .find_map(|(field, value)| value.trim().is_empty().then_some(field))
    }
}

/// The checkout form.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub shipping: ShippingDetails,
    pub payment: PaymentDetails,
}

/// Summary of a placed order, captured before the cart was emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub item_count: u32,
    /// Subtotal, shipping, tax and the amount charged.
    pub summary: OrderSummary,
    pub placed_at: DateTime<Utc>,
}

/// Places orders against the session and cart.
#[derive(Clone)]
pub struct Checkout {
    delay: Duration,
    notifier: Arc<dyn Notifier>,
}

impl Checkout {
    /// Create a checkout that waits `delay` before accepting an order.
    #[must_use]
    pub fn new(delay: Duration, notifier: Arc<dyn Notifier>) -> Self {
        Self { delay, notifier }
    }

    /// The simulated processing delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Place an order for everything in the cart.
    ///
    /// The cart is emptied only once the processing delay has elapsed, and
    /// only if the returned future is driven that far. Dropping it earlier
    /// cancels the order and leaves the cart untouched.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::LoginRequired` if nobody is signed in,
    /// `CheckoutError::EmptyCart` if the cart is empty,
    /// `CheckoutError::MissingField` for a blank form field, or
    /// `CheckoutError::Storage` if the cart cannot be cleared.
    #[instrument(skip_all, fields(items = cart.item_count()))]
    pub async fn place_order(
        &self,
        session: &SessionStore,
        cart: &mut CartLedger,
        request: &OrderRequest,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !session.is_authenticated() {
            self.notifier.notify(Notification::destructive(
                "Login required",
                "Please login to proceed to checkout",
            ));
            return Err(CheckoutError::LoginRequired);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        if let Some(field) = request
            .shipping
            .missing_field()
            .or_else(|| request.payment.missing_field())
        {
            return Err(CheckoutError::MissingField(field));
        }

        let item_count = cart.item_count();
        let summary = cart.order_summary();

        tokio::time::sleep(self.delay).await;

        cart.clear_cart()?;
        self.notifier.notify(Notification::new(
            "Order placed successfully!",
            "Thank you for your purchase!",
        ));

        tracing::info!(item_count, total = %summary.total, "Order placed");

        Ok(OrderReceipt {
            item_count,
            summary,
            placed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::notify::{RecordingNotifier, Variant};
    use crate::storage::MemoryStorage;
    use ekart_core::{CatalogItem, ProductId};
    use rust_decimal::Decimal;

    struct Fixture {
        session: SessionStore,
        cart: CartLedger,
        checkout: Checkout,
        notifier: Arc<RecordingNotifier>,
    }

    fn fixture() -> Fixture {
        let storage = Arc::new(MemoryStorage::new());
        let notifier = Arc::new(RecordingNotifier::new());
        Fixture {
            session: SessionStore::load(storage.clone(), notifier.clone()).unwrap(),
            cart: CartLedger::load(storage, notifier.clone()).unwrap(),
            checkout: Checkout::new(Duration::ZERO, notifier.clone()),
            notifier,
        }
    }

    fn item(id: i64, price: i64) -> CatalogItem {
        CatalogItem {
            id: ProductId::new(id),
            title: format!("Item {id}"),
            price: Decimal::from(price),
            category: "jewelery".to_string(),
            description: String::new(),
            image: String::new(),
            rating: None,
        }
    }

    fn request(session: Option<&Session>) -> OrderRequest {
        OrderRequest {
            shipping: ShippingDetails {
                address: "12 MG Road".to_string(),
                city: "Pune".to_string(),
                state: "MH".to_string(),
                pincode: "411001".to_string(),
                phone: "9999999999".to_string(),
                ..ShippingDetails::for_session(session)
            },
            payment: PaymentDetails {
                card_number: SecretString::from("4111111111111111".to_string()),
                card_name: "Asha".to_string(),
                expiry: "12/30".to_string(),
                cvv: SecretString::from("123".to_string()),
            },
        }
    }

    fn sign_in(fx: &mut Fixture) {
        assert!(fx.session.signup(
            "Asha",
            "asha@example.com",
            &SecretString::from("pw".to_string())
        ));
        let _ = fx.notifier.drain();
    }

    #[tokio::test]
    async fn test_requires_login() {
        let mut fx = fixture();
        fx.cart.add_to_cart(&item(1, 10), 1).unwrap();
        let _ = fx.notifier.drain();

        let result = fx
            .checkout
            .place_order(&fx.session, &mut fx.cart, &request(None))
            .await;

        assert!(matches!(result, Err(CheckoutError::LoginRequired)));
        assert_eq!(fx.cart.item_count(), 1);

        let toast = fx.notifier.last().unwrap();
        assert_eq!(toast.title, "Login required");
        assert_eq!(toast.variant, Variant::Destructive);
    }

    #[tokio::test]
    async fn test_rejects_empty_cart() {
        let mut fx = fixture();
        sign_in(&mut fx);

        let req = request(fx.session.current());
        let result = fx.checkout.place_order(&fx.session, &mut fx.cart, &req).await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
        assert!(fx.notifier.is_empty());
    }

    #[tokio::test]
    async fn test_rejects_blank_field() {
        let mut fx = fixture();
        sign_in(&mut fx);
        fx.cart.add_to_cart(&item(1, 10), 1).unwrap();

        let mut req = request(fx.session.current());
        req.shipping.pincode = "  ".to_string();
        let result = fx.checkout.place_order(&fx.session, &mut fx.cart, &req).await;

        assert!(matches!(result, Err(CheckoutError::MissingField("pincode"))));
        assert!(!fx.cart.is_empty());
    }

    #[tokio::test]
    async fn test_places_order_and_clears_cart() {
        let mut fx = fixture();
        sign_in(&mut fx);
        fx.cart.add_to_cart(&item(1, 10), 2).unwrap();
        fx.cart.add_to_cart(&item(2, 1), 1).unwrap();
        let _ = fx.notifier.drain();

        let req = request(fx.session.current());
        let receipt = fx
            .checkout
            .place_order(&fx.session, &mut fx.cart, &req)
            .await
            .unwrap();

        // 2 x 10 x 83 + 1 x 1 x 83, plus 18% tax
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.summary.subtotal.amount, Decimal::from(1743));
        assert_eq!(receipt.summary.tax.display(), "₹313.74");
        assert_eq!(receipt.summary.total.display(), "₹2056.74");
        assert!(fx.cart.is_empty());

        let titles: Vec<String> = fx.notifier.drain().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["Cart cleared", "Order placed successfully!"]);
    }

    #[tokio::test]
    async fn test_abandoned_order_keeps_cart() {
        let mut fx = fixture();
        sign_in(&mut fx);
        fx.cart.add_to_cart(&item(1, 10), 1).unwrap();
        let _ = fx.notifier.drain();

        let checkout = Checkout::new(Duration::from_secs(60), fx.notifier.clone());
        let req = request(fx.session.current());
        let outcome = tokio::time::timeout(
            Duration::from_millis(10),
            checkout.place_order(&fx.session, &mut fx.cart, &req),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(fx.cart.item_count(), 1);
        assert!(fx.notifier.is_empty());
    }

    #[test]
    fn test_shipping_defaults_from_session() {
        let mut fx = fixture();
        sign_in(&mut fx);

        let shipping = ShippingDetails::for_session(fx.session.current());
        assert_eq!(shipping.name, "Asha");
        assert_eq!(shipping.email, "asha@example.com");
        assert!(shipping.address.is_empty());

        assert_eq!(ShippingDetails::for_session(None), ShippingDetails::default());
    }

    #[test]
    fn test_payment_debug_is_redacted() {
        let req = request(None);
        let debug = format!("{:?}", req.payment);
        assert!(!debug.contains("4111"));
        assert!(debug.contains("[REDACTED]"));
    }
}
