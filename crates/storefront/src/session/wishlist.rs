//! Wishlist state: a set of products keyed by product id.

use akasha_core::{Product, ProductId};
use tracing::debug;

use crate::storage::{PersistentStore, keys};

/// Wishlist state manager.
///
/// Entries keep insertion order for display. A product is present at most
/// once regardless of variant.
#[derive(Debug)]
pub struct Wishlist {
    items: Vec<Product>,
    store: PersistentStore,
}

impl Wishlist {
    /// Load the wishlist snapshot, starting empty if missing or malformed.
    #[must_use]
    pub fn hydrate(store: PersistentStore) -> Self {
        let mut items: Vec<Product> = store.load(keys::WISHLIST).unwrap_or_default();
        dedup_by_id(&mut items);
        debug!(items = items.len(), "Hydrated wishlist");
        Self { items, store }
    }

    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Add a product. Ignored if a product with the same id is already
    /// present; the stored copy is not replaced.
    pub fn add_item(&mut self, product: Product) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        debug!(product_id = %product.id, "Added to wishlist");
        self.items.push(product);
        self.persist();
        true
    }

    /// Remove by id. Returns whether an entry was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|p| p.id != *product_id);
        let removed = self.items.len() != before;
        if removed {
            debug!(product_id = %product_id, "Removed from wishlist");
            self.persist();
        }
        removed
    }

    #[must_use]
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| p.id == *product_id)
    }

    /// Remove the product if present, otherwise add it.
    ///
    /// Returns whether the product is in the wishlist afterwards.
    pub fn toggle_item(&mut self, product: Product) -> bool {
        if self.remove_item(&product.id) {
            false
        } else {
            self.add_item(product)
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared wishlist");
        self.persist();
    }

    #[must_use]
    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    /// Write the current snapshot. Returns whether the write succeeded.
    pub fn persist(&self) -> bool {
        self.store.save(keys::WISHLIST, &self.items)
    }
}

/// Keep the first occurrence of each product id.
pub(super) fn dedup_by_id(items: &mut Vec<Product>) {
    let mut seen = std::collections::HashSet::new();
    items.retain(|p| seen.insert(p.id.clone()));
}
