//! Authentication service.
//!
//! [`SessionStore`] owns the one logical identity signed in to this process.
//! Users register into a registry record keyed by email; the active session
//! is a separate record so it survives restarts.

mod error;

pub use error::AuthError;

use std::sync::{Arc, LazyLock};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use ekart_core::Email;

use crate::models::session::{Session, keys};
use crate::models::user::{Identity, UserRegistry};
use crate::services::notify::{Notification, Notifier};
use crate::storage::{self, Storage, StorageError};

/// Hash checked when no account matches, so unknown emails cost the same
/// Argon2 work as a wrong password.
static UNKNOWN_ACCOUNT_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("ekart-unknown-account").ok());

/// Holds the current session and handles login, signup and logout.
///
/// Login and signup report their outcome twice: as the returned `bool`
/// and as a notification. Failures never change the active session.
pub struct SessionStore {
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
    current: Option<Session>,
}

impl SessionStore {
    /// Initialize from storage, restoring a persisted session if present.
    ///
    /// A corrupt session record is discarded and the store starts signed out.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session record cannot be read.
    pub fn load(
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, StorageError> {
        let current: Option<Session> =
            storage::load_or_discard(storage.as_ref(), keys::CURRENT_USER)?;

        if let Some(session) = &current {
            tracing::info!(user_id = %session.id, "Restored persisted session");
        }

        Ok(Self {
            storage,
            notifier,
            current,
        })
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Sign in with email and password.
    ///
    /// Every failure, internal faults included, produces the same notification.
    #[instrument(skip(self, password))]
    pub fn login(&mut self, email: &str, password: &SecretString) -> bool {
        match self.try_login(email, password) {
            Ok(session) => {
                tracing::info!(user_id = %session.id, "Login succeeded");
                self.notifier.notify(Notification::new(
                    "Login successful",
                    format!("Welcome back, {}!", session.name),
                ));
                true
            }
            Err(e) => {
                if !e.is_validation() {
                    tracing::error!(error = %e, "Login failed unexpectedly");
                }
                self.notifier.notify(Notification::destructive(
                    "Login failed",
                    "Invalid email or password",
                ));
                false
            }
        }
    }

    /// Register a new user and sign them in.
    ///
    /// Fails if the email is already registered.
    #[instrument(skip(self, password))]
    pub fn signup(&mut self, name: &str, email: &str, password: &SecretString) -> bool {
        match self.try_signup(name, email, password) {
            Ok(session) => {
                tracing::info!(user_id = %session.id, "Signup succeeded");
                self.notifier.notify(Notification::new(
                    "Signup successful",
                    format!("Welcome to eKart, {}!", session.name),
                ));
                true
            }
            Err(e) => {
                let description = match &e {
                    AuthError::UserAlreadyExists => "Email already in use",
                    AuthError::InvalidEmail(_) => "Please enter a valid email address",
                    _ => {
                        tracing::error!(error = %e, "Signup failed unexpectedly");
                        "An error occurred during signup"
                    }
                };
                self.notifier
                    .notify(Notification::destructive("Signup failed", description));
                false
            }
        }
    }

    /// Sign out and forget the persisted session.
    ///
    /// Signing out while signed out is allowed and still notifies.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the session record cannot be removed, in
    /// which case the session stays active.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(keys::CURRENT_USER)?;

        if let Some(session) = self.current.take() {
            tracing::info!(user_id = %session.id, "Logged out");
        }

        self.notifier.notify(Notification::new(
            "Logged out",
            "You have been successfully logged out",
        ));
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn try_login(&mut self, email: &str, password: &SecretString) -> Result<Session, AuthError> {
        let registry = self.registry()?;
        let identity = find_identity(&registry, email);

        verify_password(password.expose_secret(), credential_hash(identity))?;
        let session = identity.ok_or(AuthError::InvalidCredentials)?.session();
        self.set_current(session.clone())?;
        Ok(session)
    }

    fn try_signup(
        &mut self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<Session, AuthError> {
        let email = Email::parse(email)?;
        let mut registry = self.registry()?;

        if registry.contains_email(&email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let identity = Identity {
            id: registry.next_id(Utc::now().timestamp_millis()),
            name: name.to_string(),
            email,
            password_hash: hash_password(password.expose_secret())?,
        };
        let session = identity.session();

        let previous = registry.clone();
        registry.push(identity);
        storage::save(self.storage.as_ref(), keys::USERS, &registry)?;

        if let Err(e) = self.set_current(session.clone()) {
            if let Err(rollback) = storage::save(self.storage.as_ref(), keys::USERS, &previous) {
                tracing::error!(error = %rollback, "Failed to roll back registry after signup error");
            }
            return Err(e.into());
        }

        Ok(session)
    }

    fn registry(&self) -> Result<UserRegistry, StorageError> {
        Ok(storage::load(self.storage.as_ref(), keys::USERS)?.unwrap_or_default())
    }

    fn set_current(&mut self, session: Session) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), keys::CURRENT_USER, &session)?;
        self.current = Some(session);
        Ok(())
    }
}

/// Look up the identity registered under `email`, if it parses at all.
fn find_identity<'a>(registry: &'a UserRegistry, email: &str) -> Option<&'a Identity> {
    let email = Email::parse(email).ok()?;
    registry.find_by_email(&email)
}

/// The hash a login attempt is verified against.
fn credential_hash(identity: Option<&Identity>) -> &str {
    identity.map_or_else(
        || UNKNOWN_ACCOUNT_HASH.as_deref().unwrap_or_default(),
        |identity| identity.password_hash.as_str(),
    )
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::PasswordHash)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
