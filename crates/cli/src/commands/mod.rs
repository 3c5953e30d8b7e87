//! Command implementations.
//!
//! Each command works on a [`Storefront`](ekart_storefront::state::Storefront)
//! restored from disk at startup and prints its own results. Notifications
//! are printed by the caller once the command returns.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
