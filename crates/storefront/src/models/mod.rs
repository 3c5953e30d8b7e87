//! Domain models for storefront state.
//!
//! - [`session`] - The redacted identity exposed to callers, plus storage keys
//! - [`user`] - Registered identities and the registry they live in

pub mod session;
pub mod user;

pub use session::Session;
pub use user::{Identity, UserRegistry};
