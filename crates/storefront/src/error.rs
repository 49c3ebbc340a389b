//! Unified error handling with Sentry integration.
//!
//! Session managers never fail; these errors come from configuration,
//! opening storage, loading the catalog and the Storefront API.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::shopify::ShopifyError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storage backend could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Catalog could not be loaded or a product is missing.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Shopify API operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// A feature needs configuration that is absent.
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Invalid input from the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Whether this error points at a fault worth reporting, as opposed to
    /// bad input or missing setup.
    #[must_use]
    pub const fn is_reportable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Shopify(_))
    }

    /// Log the error and capture reportable ones to Sentry.
    pub fn report(&self) {
        if self.is_reportable() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Command error"
            );
        } else {
            tracing::error!(error = %self, "Command error");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "sage-tank")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
