//! Account commands.
//!
//! # Usage
//!
//! ```bash
//! EKART_PASSWORD=... ekart signup -n "Asha" -e asha@example.com
//! EKART_PASSWORD=... ekart login -e asha@example.com
//! ekart whoami
//! ekart logout
//! ```

use secrecy::SecretString;

use ekart_storefront::error::{self, AppError, Result};
use ekart_storefront::state::Storefront;

/// Register and sign in.
///
/// The reason for a failure is reported as a notification.
pub fn signup(store: &mut Storefront, name: &str, email: &str, password: &SecretString) -> Result<()> {
    if !store.session_mut().signup(name, email, password) {
        return Err(AppError::BadRequest("signup failed".to_string()));
    }
    tag_sentry_user(store);
    Ok(())
}

/// Sign in.
pub fn login(store: &mut Storefront, email: &str, password: &SecretString) -> Result<()> {
    if !store.session_mut().login(email, password) {
        return Err(AppError::BadRequest("login failed".to_string()));
    }
    tag_sentry_user(store);
    Ok(())
}

/// Sign out.
pub fn logout(store: &mut Storefront) -> Result<()> {
    store.session_mut().logout()?;
    error::clear_sentry_user();
    Ok(())
}

/// Print the signed-in user.
#[allow(clippy::print_stdout)]
pub fn whoami(store: &Storefront) {
    match store.session().current() {
        Some(session) => println!("{} <{}> (id {})", session.name, session.email, session.id),
        None => println!("Not logged in"),
    }
}

fn tag_sentry_user(store: &Storefront) {
    if let Some(session) = store.session().current() {
        error::set_sentry_user(&session.id, Some(session.email.as_str()));
    }
}
