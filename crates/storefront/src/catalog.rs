//! In-memory product catalog.
//!
//! Page-level code resolves products here (or through the Storefront API)
//! before handing them to the session managers, which never look products up
//! themselves.

use std::path::Path;

use akasha_core::{Product, ProductId};
use thiserror::Error;
use tracing::info;

/// Maximum number of products returned by [`Catalog::search`].
pub const MAX_SEARCH_RESULTS: usize = 6;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product not found: {0}")]
    NotFound(ProductId),
}

/// A fixed list of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Parse a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not a product array.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Load a JSON array of products from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), products = catalog.products.len(), "Loaded catalog");
        Ok(catalog)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Look up a product, failing with `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if no product has this id.
    pub fn require(&self, id: &ProductId) -> Result<&Product, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    /// Case-insensitive substring search over name, short description,
    /// category and movement tags. Returns at most [`MAX_SEARCH_RESULTS`]
    /// products in catalog order; a blank query matches nothing.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.short_description.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.movements
                        .iter()
                        .any(|m| m.as_str().to_lowercase().contains(&needle))
            })
            .take(MAX_SEARCH_RESULTS)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "flow-legging", "name": "Flow Legging", "price": 98,
         "category": "bottoms", "movements": ["yoga"], "shortDescription": "Buttery soft"},
        {"id": "sage-tank", "name": "Sage Tank", "price": 58,
         "category": "tops", "movements": ["pilates"], "shortDescription": "Breathable"},
        {"id": "run-short", "name": "Stride Short", "price": 64,
         "category": "bottoms", "movements": ["run"], "shortDescription": "Lightweight for yoga cooldowns"}
    ]"#;

    #[test]
    fn test_get_and_require() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.products().len(), 3);
        assert!(catalog.get(&ProductId::new("sage-tank")).is_some());
        assert!(matches!(
            catalog.require(&ProductId::new("missing")),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn test_search_matches_fields_case_insensitively() {
        let catalog = Catalog::from_json(CATALOG).unwrap();

        let ids = |q: &str| -> Vec<String> {
            catalog.search(q).iter().map(|p| p.id.to_string()).collect()
        };

        assert_eq!(ids("TANK"), vec!["sage-tank"]);
        assert_eq!(ids("bottoms"), vec!["flow-legging", "run-short"]);
        assert_eq!(ids("yoga"), vec!["flow-legging", "run-short"]);
        assert!(ids("  ").is_empty());
    }

    #[test]
    fn test_search_limits_results() {
        let products: String = (0..10)
            .map(|i| format!(r#"{{"id": "p{i}", "name": "Legging {i}", "price": 10}}"#))
            .collect::<Vec<_>>()
            .join(",");
        let catalog = Catalog::from_json(&format!("[{products}]")).unwrap();
        assert_eq!(catalog.search("legging").len(), MAX_SEARCH_RESULTS);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(matches!(
            Catalog::from_json("{}"),
            Err(CatalogError::Parse(_))
        ));
    }
}
