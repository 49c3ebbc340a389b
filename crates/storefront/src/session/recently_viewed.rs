//! Recently viewed products, most recent first.

use akasha_core::{Product, ProductId};
use tracing::debug;

use super::wishlist::dedup_by_id;
use crate::storage::{PersistentStore, keys};

/// Maximum number of products remembered.
pub const MAX_RECENTLY_VIEWED: usize = 8;

/// Recently-viewed state manager.
#[derive(Debug)]
pub struct RecentlyViewed {
    items: Vec<Product>,
    store: PersistentStore,
}

impl RecentlyViewed {
    #[must_use]
    pub fn hydrate(store: PersistentStore) -> Self {
        let mut items: Vec<Product> = store.load(keys::RECENTLY_VIEWED).unwrap_or_default();
        dedup_by_id(&mut items);
        items.truncate(MAX_RECENTLY_VIEWED);
        debug!(items = items.len(), "Hydrated recently viewed");
        Self { items, store }
    }

    /// Products, most recently viewed first.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// Products other than `current`, for "you may also like" rails on a
    /// product page. The stored list itself is not filtered.
    pub fn excluding<'a>(&'a self, current: &'a ProductId) -> impl Iterator<Item = &'a Product> {
        self.items.iter().filter(move |p| p.id != *current)
    }

    /// Record a product view: moves it to the front, dropping the oldest
    /// entry when the list is full.
    pub fn add_item(&mut self, product: Product) {
        self.items.retain(|p| p.id != product.id);
        debug!(product_id = %product.id, "Recorded product view");
        self.items.insert(0, product);
        self.items.truncate(MAX_RECENTLY_VIEWED);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Write the current snapshot. Returns whether the write succeeded.
    pub fn persist(&self) -> bool {
        self.store.save(keys::RECENTLY_VIEWED, &self.items)
    }
}
