//! eKart Core - Shared types library.
//!
//! This crate provides common types used across all eKart components:
//! - `storefront` - Session store, cart ledger, catalog client and checkout
//! - `cli` - Command-line front-end over the storefront state
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and emails, plus catalog and
//!   ledger records with their derived aggregates

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
