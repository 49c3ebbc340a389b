//! Integration tests for AKASHA.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p akasha-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_persistence` - shopper session state across restarts on the
//!   file store
//! - `storefront_client` - Storefront API client against a `wiremock` server
//!
//! This library holds shared fixtures.

use std::time::Duration;

use akasha_core::Product;
use akasha_storefront::catalog::Catalog;
use akasha_storefront::config::{ShopifyStorefrontConfig, TokenKind};
use secrecy::SecretString;

/// A small catalog in the storefront's JSON format.
pub const CATALOG_JSON: &str = r##"[
    {
        "id": "flow-legging",
        "name": "Flow Legging",
        "price": 98,
        "originalPrice": 118,
        "images": ["/images/flow-legging-1.jpg", "/images/flow-legging-2.jpg"],
        "colors": [{"name": "Sage", "hex": "#9CAF88"}, {"name": "Black", "hex": "#1A1A1A"}],
        "sizes": ["XS", "S", "M", "L"],
        "category": "bottoms",
        "movements": ["yoga", "pilates"],
        "isNew": true,
        "isBestSeller": true,
        "reviews": {"rating": 4.9, "count": 212},
        "shortDescription": "Buttery-soft high-rise legging",
        "description": "Our signature legging for flowing practice.",
        "materials": ["75% Nylon", "25% Spandex"],
        "intensity": "medium"
    },
    {
        "id": "sculpt-bra",
        "name": "Sculpt Bra",
        "price": 88,
        "images": ["/images/sculpt-bra-1.jpg"],
        "colors": [{"name": "Sand", "hex": "#D8C8B0"}],
        "sizes": ["S", "M", "L"],
        "category": "tops",
        "movements": ["strength"],
        "reviews": {"rating": 4.7, "count": 98},
        "shortDescription": "Supportive sports bra",
        "intensity": "high"
    },
    {
        "id": "drift-jogger",
        "name": "Drift Jogger",
        "price": 108,
        "colors": [{"name": "Stone", "hex": "#A8A29E"}],
        "sizes": ["S", "M", "L", "XL"],
        "category": "bottoms",
        "movements": ["recovery"],
        "shortDescription": "Relaxed recovery jogger"
    }
]"##;

/// Parse [`CATALOG_JSON`].
///
/// # Panics
///
/// Panics if the fixture is invalid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn catalog() -> Catalog {
    Catalog::from_json(CATALOG_JSON).expect("fixture catalog parses")
}

/// A product from the fixture catalog.
///
/// # Panics
///
/// Panics if the id is not in the fixture.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: &str) -> Product {
    catalog()
        .get(&id.into())
        .cloned()
        .expect("fixture product exists")
}

/// Storefront configuration pointing at a mock server base URL.
#[must_use]
pub fn shopify_config(base_url: &str, cache_ttl: Option<Duration>) -> ShopifyStorefrontConfig {
    ShopifyStorefrontConfig {
        store: base_url.to_string(),
        api_version: "2025-01".to_string(),
        access_token: SecretString::from("3f9a1c7be2d84f06a5c9e1b7d3f20a8c"),
        token_kind: TokenKind::Public,
        cache_ttl,
    }
}
