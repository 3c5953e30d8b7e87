//! Session-related types.
//!
//! Types persisted for authentication and cart state.

use serde::{Deserialize, Serialize};

use ekart_core::{Email, UserId};

/// The currently authenticated identity.
///
/// This is the redacted view of an [`Identity`](super::Identity): it never
/// carries password material, in memory or on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Registry ID of the user.
    pub id: UserId,
    /// Display name given at signup.
    pub name: String,
    /// User's email address.
    pub email: Email,
}

/// Storage keys for persisted state.
pub mod keys {
    /// Key for the serialized cart ledger.
    pub const CART: &str = "eKartCart";

    /// Key for the currently logged-in user.
    pub const CURRENT_USER: &str = "eKartUser";

    /// Key for the registry of all signed-up users.
    pub const USERS: &str = "eKartUsers";
}
