//! Storefront state containers and the operations on them.
//!
//! # Services
//!
//! - `auth` - Session store: login, signup, logout
//! - `cart` - Cart ledger: add, remove, update, clear
//! - `checkout` - Order placement against the session and cart
//! - `notify` - User-visible notifications

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod notify;

pub use auth::{AuthError, SessionStore};
pub use cart::CartLedger;
pub use checkout::{
    Checkout, CheckoutError, OrderReceipt, OrderRequest, PaymentDetails, ShippingDetails,
};
pub use notify::{
    FanoutNotifier, Notification, Notifier, RecordingNotifier, TracingNotifier, Variant,
};
