//! eKart storefront library.
//!
//! Client-side state for the eKart store: the session store, the cart
//! ledger, their persistence, and the catalog client front-ends browse with.
//!
//! # Modules
//!
//! - `storage` - Durable key-value records
//! - `models` - Session and user registry records
//! - `services` - Session store, cart ledger, checkout, notifications
//! - `catalog` - Catalog API client and search
//! - `state` - [`Storefront`](state::Storefront), everything wired together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
