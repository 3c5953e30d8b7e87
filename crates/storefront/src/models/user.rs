//! User domain types.

use serde::{Deserialize, Serialize};

use ekart_core::{Email, UserId};

use super::session::Session;

/// A registered user, as stored in the registry.
///
/// Implements `Debug` manually to redact the password hash.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique user ID, assigned at signup.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique within the registry.
    pub email: Email,
    /// Argon2id PHC string for the user's password.
    pub password_hash: String,
}

impl Identity {
    /// The redacted view of this identity.
    #[must_use]
    pub fn session(&self) -> Session {
        Session {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// All signed-up users, in signup order.
///
/// Email uniqueness is exact string equality: addresses that differ only in
/// letter case are distinct users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRegistry {
    users: Vec<Identity>,
}

impl UserRegistry {
    /// Find the user registered under `email`.
    #[must_use]
    pub fn find_by_email(&self, email: &Email) -> Option<&Identity> {
        self.users.iter().find(|user| &user.email == email)
    }

    /// Whether `email` is already registered.
    #[must_use]
    pub fn contains_email(&self, email: &Email) -> bool {
        self.find_by_email(email).is_some()
    }

    /// Pick an ID for a new user.
    ///
    /// IDs are millisecond timestamps; if `now_millis` is not above every
    /// existing ID (two signups in the same millisecond, or a clock step
    /// backwards) the next integer after the largest ID is used instead.
    #[must_use]
    pub fn next_id(&self, now_millis: i64) -> UserId {
        let floor = self
            .users
            .iter()
            .map(|user| user.id.as_i64().saturating_add(1))
            .max()
            .unwrap_or(i64::MIN);
        UserId::new(now_millis.max(floor))
    }

    /// Append a user. Callers check [`contains_email`](Self::contains_email) first.
    pub fn push(&mut self, identity: Identity) {
        self.users.push(identity);
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterate users in signup order.
    pub fn iter(&self) -> impl Iterator<Item = &Identity> {
        self.users.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(id: i64, email: &str) -> Identity {
        Identity {
            id: UserId::new(id),
            name: "Asha".to_string(),
            email: Email::parse(email).unwrap(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        }
    }

    #[test]
    fn test_session_view_has_no_password() {
        let session = identity(1, "a@b.com").session();
        let json = serde_json::to_value(&session).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["email"], "a@b.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let debug = format!("{:?}", identity(1, "a@b.com"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("argon2id"));
    }

    #[test]
    fn test_lookup_is_exact() {
        let mut registry = UserRegistry::default();
        registry.push(identity(1, "a@b.com"));

        assert!(registry.contains_email(&Email::parse("a@b.com").unwrap()));
        assert!(!registry.contains_email(&Email::parse("A@b.com").unwrap()));
    }

    #[test]
    fn test_next_id_never_repeats() {
        let mut registry = UserRegistry::default();
        assert_eq!(registry.next_id(1_000), UserId::new(1_000));

        registry.push(identity(1_000, "a@b.com"));
        assert_eq!(registry.next_id(1_000), UserId::new(1_001));
        assert_eq!(registry.next_id(900), UserId::new(1_001));
        assert_eq!(registry.next_id(5_000), UserId::new(5_000));
    }

    #[test]
    fn test_registry_serializes_as_array() {
        let mut registry = UserRegistry::default();
        registry.push(identity(1, "a@b.com"));

        let json = serde_json::to_value(&registry).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["email"], "a@b.com");
    }
}
