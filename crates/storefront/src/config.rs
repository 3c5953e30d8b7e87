//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `EKART_DATA_DIR` - Directory for persisted state (default: .ekart)
//! - `EKART_CATALOG_URL` - Catalog API base URL (default: <https://fakestoreapi.com>)
//! - `EKART_CATALOG_CACHE_TTL_SECS` - Catalog response cache TTL (default: 300)
//! - `EKART_CHECKOUT_DELAY_MS` - Simulated order processing time (default: 2000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".ekart";
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";
const DEFAULT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_CHECKOUT_DELAY_MS: &str = "2000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Source of configuration values, keyed by variable name.
type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the Sentry DSN.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Directory holding the persisted cart, session and user records
    pub data_dir: PathBuf,
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// How long checkout waits before accepting an order
    pub checkout_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<SecretString>,
    /// Sentry environment (e.g., production, staging)
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("data_dir", &self.data_dir)
            .field("catalog", &self.catalog)
            .field("checkout_delay", &self.checkout_delay)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of a Fake Store compatible API
    pub base_url: Url,
    /// Time-to-live for cached responses
    pub cache_ttl: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(env: Lookup<'_>) -> Result<Self, ConfigError> {
        let data_dir = PathBuf::from(get_env_or_default(env, "EKART_DATA_DIR", DEFAULT_DATA_DIR));
        let catalog = CatalogConfig::from_lookup(env)?;
        let checkout_delay = Duration::from_millis(get_parsed_env(
            env,
            "EKART_CHECKOUT_DELAY_MS",
            DEFAULT_CHECKOUT_DELAY_MS,
        )?);
        let sentry_dsn = get_optional_env(env, "SENTRY_DSN").map(SecretString::from);
        let sentry_environment = get_optional_env(env, "SENTRY_ENVIRONMENT");

        Ok(Self {
            data_dir,
            catalog,
            checkout_delay,
            sentry_dsn,
            sentry_environment,
        })
    }
}

impl CatalogConfig {
    fn from_lookup(env: Lookup<'_>) -> Result<Self, ConfigError> {
        let raw = get_env_or_default(env, "EKART_CATALOG_URL", DEFAULT_CATALOG_URL);
        let base_url = parse_base_url(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("EKART_CATALOG_URL".to_string(), e))?;
        let cache_ttl = Duration::from_secs(get_parsed_env(
            env,
            "EKART_CATALOG_CACHE_TTL_SECS",
            DEFAULT_CACHE_TTL_SECS,
        )?);

        Ok(Self {
            base_url,
            cache_ttl,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable. Blank values count as unset.
fn get_optional_env(env: Lookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

/// Get a variable with a default value.
fn get_env_or_default(env: Lookup<'_>, key: &str, default: &str) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

/// Get a variable parsed as `T`, with a default.
fn get_parsed_env<T>(env: Lookup<'_>, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(env, key, default)
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse an http(s) base URL.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_base_url_accepts_http() {
        let url = parse_base_url("https://fakestoreapi.com").unwrap();
        assert_eq!(url.host_str(), Some("fakestoreapi.com"));

        assert!(parse_base_url(" http://127.0.0.1:8080/ ").is_ok());
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());

        let err = parse_base_url("ftp://example.com").unwrap_err();
        assert!(err.contains("ftp"));
    }

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::from_lookup(&lookup(&[])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".ekart"));
        assert_eq!(config.checkout_delay, Duration::from_secs(2));
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.catalog.base_url.as_str(), "https://fakestoreapi.com/");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = StorefrontConfig::from_lookup(&lookup(&[
            ("EKART_DATA_DIR", "/var/lib/ekart"),
            ("EKART_CATALOG_URL", "http://localhost:9000"),
            ("EKART_CATALOG_CACHE_TTL_SECS", "5"),
            ("EKART_CHECKOUT_DELAY_MS", "0"),
            ("SENTRY_ENVIRONMENT", "staging"),
            ("SENTRY_DSN", "   "),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/ekart"));
        assert_eq!(config.catalog.base_url.port(), Some(9000));
        assert_eq!(config.catalog.cache_ttl, Duration::from_secs(5));
        assert_eq!(config.checkout_delay, Duration::ZERO);
        assert_eq!(config.sentry_environment.as_deref(), Some("staging"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        let err = StorefrontConfig::from_lookup(&lookup(&[("EKART_CHECKOUT_DELAY_MS", "-1")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "EKART_CHECKOUT_DELAY_MS"));

        let err = StorefrontConfig::from_lookup(&lookup(&[("EKART_CATALOG_URL", "ftp://x")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "EKART_CATALOG_URL"));
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let config = StorefrontConfig::from_lookup(&lookup(&[(
            "SENTRY_DSN",
            "https://key@o1.ingest.sentry.io/1",
        )]))
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("key@"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidEnvVar("EKART_CHECKOUT_DELAY_MS".to_string(), "nope".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid environment variable EKART_CHECKOUT_DELAY_MS: nope"
        );
    }
}
