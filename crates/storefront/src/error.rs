//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front-ends. Internal failures are
//! captured to Sentry by [`AppError::report`]; the shopper only ever sees
//! [`AppError::user_message`].

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Persisted state could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog API operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Order placement failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Bad request from the user.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this is a fault on our side rather than a rejected request.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Config(_) | Self::Storage(_) => true,
            Self::Auth(err) => !err.is_validation(),
            Self::Catalog(err) => !matches!(err, CatalogError::NotFound(_)),
            Self::Checkout(err) => matches!(err, CheckoutError::Storage(_)),
            Self::BadRequest(_) => false,
        }
    }

    /// A message safe to show the shopper.
    ///
    /// Internal error details are never exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => err.to_string(),
            Self::Storage(_) => "Could not save your changes".to_string(),
            Self::Catalog(CatalogError::NotFound(_)) => "Product not found".to_string(),
            Self::Catalog(_) => "The product catalog is unavailable".to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::InvalidEmail(_) => {
                    "Invalid email or password".to_string()
                }
                AuthError::UserAlreadyExists => "Email already in use".to_string(),
                AuthError::Storage(_) | AuthError::PasswordHash => {
                    "Authentication error".to_string()
                }
            },
            Self::Checkout(err) => match err {
                CheckoutError::LoginRequired => "Please login to proceed to checkout".to_string(),
                CheckoutError::EmptyCart => "Your cart is empty".to_string(),
                CheckoutError::MissingField(field) => format!("Please fill in the {field} field"),
                CheckoutError::Storage(_) => "Could not save your changes".to_string(),
            },
            Self::BadRequest(_) => self.to_string(),
        }
    }

    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command failed"
            );
        } else {
            tracing::debug!(error = %self, "Command rejected");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from a user ID.
///
/// Call this after successful authentication to associate errors with users.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a user action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}
