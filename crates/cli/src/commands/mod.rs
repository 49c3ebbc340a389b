//! Command implementations.
//!
//! Every command hydrates a fresh [`ShopperSession`] from the file store,
//! applies one operation and exits; managers persist as they mutate.

pub mod cart;
pub mod popup;
pub mod search;
pub mod shop;
pub mod viewed;
pub mod wishlist;

use akasha_core::{Product, ProductId};
use akasha_storefront::ShopperSession;
use akasha_storefront::catalog::Catalog;
use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::Result;
use akasha_storefront::storage::{FileStore, PersistentStore};

/// Hydrate the shopper session from the configured data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created.
pub fn open_session(config: &StorefrontConfig) -> Result<ShopperSession> {
    let store = PersistentStore::new(FileStore::open(&config.data_dir)?);
    Ok(ShopperSession::hydrate(&store))
}

/// Load the configured catalog.
///
/// # Errors
///
/// Returns an error if the catalog file cannot be read or parsed.
pub fn open_catalog(config: &StorefrontConfig) -> Result<Catalog> {
    Ok(Catalog::load(&config.catalog_path)?)
}

/// Resolve a product id against the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or has no such product.
pub fn resolve_product(config: &StorefrontConfig, id: &str) -> Result<Product> {
    let catalog = open_catalog(config)?;
    Ok(catalog.require(&ProductId::new(id))?.clone())
}
