//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AKASHA_DATA_DIR` - Directory for persisted session state (default: .akasha)
//! - `AKASHA_CATALOG` - Product catalog JSON file (default: catalog.json)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API access token
//!   (required when `SHOPIFY_STORE_DOMAIN` is set)
//! - `SHOPIFY_API_VERSION` - API version (default: 2025-01)
//! - `SHOPIFY_TOKEN_KIND` - `public` (default) or `private`
//! - `SHOPIFY_CACHE_TTL_SECS` - Response cache TTL; 0 disables caching (default: 0)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_API_VERSION: &str = "2025-01";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding one JSON document per session key
    pub data_dir: PathBuf,
    /// Product catalog file
    pub catalog_path: PathBuf,
    /// Shopify Storefront API configuration, if a store is configured
    pub shopify: Option<ShopifyStorefrontConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Which Storefront API token is configured; decides the auth header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Public token, safe to expose in browsers
    #[default]
    Public,
    /// Private token, server-side only
    Private,
}

impl TokenKind {
    /// Request header carrying the token.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::Public => "X-Shopify-Storefront-Access-Token",
            Self::Private => "Shopify-Storefront-Private-Token",
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(format!("expected 'public' or 'private', got '{other}'")),
        }
    }
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com). A value with an
    /// explicit `http://` or `https://` scheme is used as the base URL as-is.
    pub store: String,
    /// Shopify API version (e.g., 2025-01)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: SecretString,
    /// Kind of access token
    pub token_kind: TokenKind,
    /// Response cache TTL; `None` disables caching
    pub cache_ttl: Option<Duration>,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .field("token_kind", &self.token_kind)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl ShopifyStorefrontConfig {
    /// GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        let base = if self.store.starts_with("http://") || self.store.starts_with("https://") {
            self.store.trim_end_matches('/').to_string()
        } else {
            format!("https://{}", self.store)
        };
        format!("{base}/api/{}/graphql.json", self.api_version)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is invalid, if the store domain is
    /// set without an access token, or if the token fails validation
    /// (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a fixed set of variables.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env(lookup);

        let data_dir = PathBuf::from(env.get_or_default("AKASHA_DATA_DIR", ".akasha"));
        let catalog_path = PathBuf::from(env.get_or_default("AKASHA_CATALOG", "catalog.json"));
        let shopify = ShopifyStorefrontConfig::from_env(&env)?;
        let sentry_dsn = env.get_optional("SENTRY_DSN");

        Ok(Self {
            data_dir,
            catalog_path,
            shopify,
            sentry_dsn,
        })
    }
}

impl ShopifyStorefrontConfig {
    fn from_env<F: Fn(&str) -> Option<String>>(env: &Env<F>) -> Result<Option<Self>, ConfigError> {
        let Some(store) = env.get_optional("SHOPIFY_STORE_DOMAIN") else {
            return Ok(None);
        };

        let token_kind = env
            .get_or_default("SHOPIFY_TOKEN_KIND", "public")
            .parse::<TokenKind>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_TOKEN_KIND".to_string(), e))?;

        let ttl_secs = env
            .get_or_default("SHOPIFY_CACHE_TTL_SECS", "0")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPIFY_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Some(Self {
            store,
            api_version: env.get_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            access_token: env.get_validated_secret("SHOPIFY_STOREFRONT_ACCESS_TOKEN")?,
            token_kind,
            cache_ttl: (ttl_secs > 0).then(|| Duration::from_secs(ttl_secs)),
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable source. Empty values count as unset.
struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get an optional variable.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get a required variable.
    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        self.get_optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get_optional(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Load and validate a secret.
    fn get_validated_secret(&self, key: &str) -> Result<SecretString, ConfigError> {
        let value = self.get_required(key)?;
        validate_secret_strength(&value, key)?;
        Ok(SecretString::from(value))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real access tokens are random hex, well above this threshold
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const TOKEN: &str = "3f9a1c7be2d84f06a5c9e1b7d3f20a8c";

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_without_shopify() {
        let config = StorefrontConfig::from_vars(&HashMap::new()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".akasha"));
        assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
        assert!(config.shopify.is_none());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_shopify_config_loaded() {
        let config = StorefrontConfig::from_vars(&vars(&[
            ("SHOPIFY_STORE_DOMAIN", "akasha.myshopify.com"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", TOKEN),
            ("SHOPIFY_CACHE_TTL_SECS", "300"),
        ]))
        .unwrap();

        let shopify = config.shopify.unwrap();
        assert_eq!(shopify.api_version, "2025-01");
        assert_eq!(shopify.token_kind, TokenKind::Public);
        assert_eq!(shopify.cache_ttl, Some(Duration::from_secs(300)));
        assert_eq!(
            shopify.endpoint(),
            "https://akasha.myshopify.com/api/2025-01/graphql.json"
        );
    }

    #[test]
    fn test_domain_without_token_is_error() {
        let err = StorefrontConfig::from_vars(&vars(&[(
            "SHOPIFY_STORE_DOMAIN",
            "akasha.myshopify.com",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref v) if v == "SHOPIFY_STOREFRONT_ACCESS_TOKEN"));
    }

    #[test]
    fn test_invalid_token_kind() {
        let err = StorefrontConfig::from_vars(&vars(&[
            ("SHOPIFY_STORE_DOMAIN", "akasha.myshopify.com"),
            ("SHOPIFY_STOREFRONT_ACCESS_TOKEN", TOKEN),
            ("SHOPIFY_TOKEN_KIND", "admin"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_endpoint_with_explicit_scheme() {
        let config = ShopifyStorefrontConfig {
            store: "http://127.0.0.1:8080/".to_string(),
            api_version: "2025-01".to_string(),
            access_token: SecretString::from(TOKEN),
            token_kind: TokenKind::Private,
            cache_ttl: None,
        };
        assert_eq!(
            config.endpoint(),
            "http://127.0.0.1:8080/api/2025-01/graphql.json"
        );
        assert_eq!(
            config.token_kind.header_name(),
            "Shopify-Storefront-Private-Token"
        );
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-storefront-token", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        assert!(validate_secret_strength(TOKEN, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_shopify_config_debug_redacts_token() {
        let config = ShopifyStorefrontConfig {
            store: "akasha.myshopify.com".to_string(),
            api_version: "2025-01".to_string(),
            access_token: SecretString::from("super_secret_token_value"),
            token_kind: TokenKind::Public,
            cache_ttl: None,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("akasha.myshopify.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token_value"));
    }
}
