//! Shopping cart state.
//!
//! Lines are identified by (product id, color, size). Adding a line that
//! already exists increments its quantity in place; insertion order is
//! display order and merging never moves a line.

use std::num::NonZeroU32;

use akasha_core::{Price, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::{PersistentStore, keys};

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(150, 0, 0, false, 0);

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: Product,
    /// Always at least 1 while the line is in the cart.
    pub quantity: u32,
    pub selected_color: String,
    pub selected_size: String,
}

impl CartItem {
    fn matches(&self, product_id: &ProductId, color: &str, size: &str) -> bool {
        self.product.id == *product_id && self.selected_color == color && self.selected_size == size
    }

    /// `unit price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Fold lines sharing (product id, color, size) into the first occurrence,
/// summing quantities.
fn merge_duplicate_lines(items: &mut Vec<CartItem>) {
    let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        if let Some(line) = merged.iter_mut().find(|line| {
            line.matches(&item.product.id, &item.selected_color, &item.selected_size)
        }) {
            line.quantity = line.quantity.saturating_add(item.quantity);
        } else {
            merged.push(item);
        }
    }
    *items = merged;
}

/// Cart state manager.
#[derive(Debug)]
pub struct Cart {
    items: Vec<CartItem>,
    is_open: bool,
    store: PersistentStore,
}

impl Cart {
    /// Load the cart snapshot from `store`, starting empty if there is none
    /// or it cannot be parsed.
    #[must_use]
    pub fn hydrate(store: PersistentStore) -> Self {
        let mut items: Vec<CartItem> = store.load(keys::CART).unwrap_or_default();

        let before = items.len();
        items.retain(|item| item.quantity > 0);
        if items.len() != before {
            warn!(
                dropped = before - items.len(),
                "Dropped zero-quantity lines from persisted cart"
            );
        }

        let before = items.len();
        merge_duplicate_lines(&mut items);
        if items.len() != before {
            warn!(
                merged = before - items.len(),
                "Merged duplicate lines in persisted cart"
            );
        }

        debug!(lines = items.len(), "Hydrated cart");
        Self {
            items,
            is_open: false,
            store,
        }
    }

    /// Lines in display order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `quantity` of a product variant, merging into an existing line.
    ///
    /// The caller is responsible for `color` and `size` being valid
    /// selections for `product`. Opens the cart drawer.
    pub fn add_item(
        &mut self,
        product: Product,
        quantity: NonZeroU32,
        color: impl Into<String>,
        size: impl Into<String>,
    ) {
        let color = color.into();
        let size = size.into();

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|item| item.matches(&product.id, &color, &size))
        {
            line.quantity = line.quantity.saturating_add(quantity.get());
            debug!(
                product_id = %product.id,
                color = %color,
                size = %size,
                quantity = line.quantity,
                "Merged cart line"
            );
        } else {
            debug!(
                product_id = %product.id,
                color = %color,
                size = %size,
                quantity = quantity.get(),
                "Added cart line"
            );
            self.items.push(CartItem {
                product,
                quantity: quantity.get(),
                selected_color: color,
                selected_size: size,
            });
        }

        self.persist();
        self.is_open = true;
    }

    /// Remove the matching line. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId, color: &str, size: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| !item.matches(product_id, color, size));

        let removed = self.items.len() != before;
        if removed {
            debug!(product_id = %product_id, color, size, "Removed cart line");
            self.persist();
        }
        removed
    }

    /// Set the matching line's quantity. A quantity of zero or less removes
    /// the line. Returns whether the cart changed.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        color: &str,
        size: &str,
        quantity: i64,
    ) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id, color, size);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(line) = self
            .items
            .iter_mut()
            .find(|item| item.matches(product_id, color, size))
        else {
            return false;
        };

        line.quantity = quantity;
        debug!(product_id = %product_id, color, size, quantity, "Updated cart line quantity");
        self.persist();
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
        debug!("Cleared cart");
        self.persist();
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of `unit price * quantity` over all lines, using current prices.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Subtotal with currency, for display.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::usd(self.total_price())
    }

    /// Amount still needed to reach free shipping (zero once reached).
    #[must_use]
    pub fn amount_until_free_shipping(&self) -> Decimal {
        (FREE_SHIPPING_THRESHOLD - self.total_price()).max(Decimal::ZERO)
    }

    /// Whether the subtotal qualifies for free shipping.
    #[must_use]
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.total_price() >= FREE_SHIPPING_THRESHOLD
    }

    /// Whether the cart drawer is visible.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    /// Show or hide the cart drawer.
    pub const fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Write the current snapshot. Returns whether the write succeeded.
    pub fn persist(&self) -> bool {
        self.store.save(keys::CART, &self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::session::test_support::product;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn qty(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn empty_cart() -> Cart {
        Cart::hydrate(PersistentStore::in_memory())
    }

    #[test]
    fn test_add_same_variant_merges() {
        let mut cart = empty_cart();
        let a = product("a", 98);
        cart.add_item(a.clone(), qty(1), "Sage", "M");
        cart.add_item(a, qty(2), "Sage", "M");

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
    }

    #[test]
    fn test_different_variants_are_separate_lines() {
        let mut cart = empty_cart();
        let a = product("a", 98);
        cart.add_item(a.clone(), qty(1), "Sage", "M");
        cart.add_item(a.clone(), qty(1), "Sage", "L");
        cart.add_item(a, qty(1), "Black", "M");
        assert_eq!(cart.items().len(), 3);
    }

    #[test]
    fn test_merge_keeps_line_position() {
        let mut cart = empty_cart();
        cart.add_item(product("a", 10), qty(1), "Sage", "M");
        cart.add_item(product("b", 10), qty(1), "Sage", "M");
        cart.add_item(product("a", 10), qty(4), "Sage", "M");

        let ids: Vec<_> = cart.items().iter().map(|i| i.product.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cart.items()[0].quantity, 5);
    }

    #[test]
    fn test_add_opens_drawer() {
        let mut cart = empty_cart();
        assert!(!cart.is_open());
        cart.add_item(product("a", 10), qty(1), "Sage", "M");
        assert!(cart.is_open());
        cart.set_open(false);
        cart.remove_item(&ProductId::new("a"), "Sage", "M");
        assert!(!cart.is_open());
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let id = ProductId::new("a");
        for quantity in [0, -5] {
            let mut updated = empty_cart();
            updated.add_item(product("a", 10), qty(2), "Sage", "M");
            updated.add_item(product("b", 10), qty(1), "Sage", "M");
            assert!(updated.update_quantity(&id, "Sage", "M", quantity));

            let mut removed = empty_cart();
            removed.add_item(product("a", 10), qty(2), "Sage", "M");
            removed.add_item(product("b", 10), qty(1), "Sage", "M");
            removed.remove_item(&id, "Sage", "M");

            assert_eq!(updated.items(), removed.items());
        }
    }

    #[test]
    fn test_update_sets_absolute_quantity() {
        let mut cart = empty_cart();
        cart.add_item(product("a", 10), qty(2), "Sage", "M");
        assert!(cart.update_quantity(&ProductId::new("a"), "Sage", "M", 7));
        assert_eq!(cart.items()[0].quantity, 7);
    }

    #[test]
    fn test_missing_line_is_noop() {
        let mut cart = empty_cart();
        cart.add_item(product("a", 10), qty(2), "Sage", "M");
        let id = ProductId::new("zzz");
        assert!(!cart.remove_item(&id, "Sage", "M"));
        assert!(!cart.update_quantity(&id, "Sage", "M", 3));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_totals() {
        let mut cart = empty_cart();
        cart.add_item(product("a", 98), qty(2), "Sage", "M");
        cart.add_item(product("b", 88), qty(1), "Black", "S");

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Decimal::new(28400, 2));
        assert_eq!(cart.subtotal().to_string(), "$284.00");
    }

    #[test]
    fn test_totals_use_current_price_not_original() {
        let mut cart = empty_cart();
        let mut discounted = product("a", 50);
        discounted.original_price = Some(Decimal::new(80, 0));
        cart.add_item(discounted, qty(2), "Sage", "M");
        assert_eq!(cart.total_price(), Decimal::new(100, 0));
    }

    #[test]
    fn test_free_shipping_remainder() {
        let mut cart = empty_cart();
        cart.add_item(product("a", 98), qty(1), "Sage", "M");
        assert_eq!(cart.amount_until_free_shipping(), Decimal::new(52, 0));
        assert!(!cart.qualifies_for_free_shipping());

        cart.add_item(product("b", 88), qty(1), "Sage", "M");
        assert_eq!(cart.amount_until_free_shipping(), Decimal::ZERO);
        assert!(cart.qualifies_for_free_shipping());
    }

    #[test]
    fn test_clear_empties_and_persists() {
        let store = PersistentStore::in_memory();
        let mut cart = Cart::hydrate(store.clone());
        cart.add_item(product("a", 10), qty(1), "Sage", "M");
        cart.clear();
        assert!(cart.is_empty());
        assert!(Cart::hydrate(store).is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_quantities() {
        let store = PersistentStore::in_memory();
        let mut cart = Cart::hydrate(store.clone());
        cart.add_item(product("b", 88), qty(1), "Black", "S");
        cart.add_item(product("a", 98), qty(2), "Sage", "M");
        cart.add_item(product("b", 88), qty(1), "Black", "S");

        let reloaded = Cart::hydrate(store);
        assert_eq!(reloaded.items(), cart.items());
        assert!(!reloaded.is_open());
    }

    #[test]
    fn test_corrupt_snapshot_hydrates_empty() {
        let backend = MemoryStore::new();
        backend.set(keys::CART, "[{\"product\": {\"id\": \"a\"").unwrap();
        let cart = Cart::hydrate(PersistentStore::new(backend));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_lines_dropped_on_hydrate() {
        let store = PersistentStore::in_memory();
        let items = vec![
            CartItem {
                product: product("a", 10),
                quantity: 0,
                selected_color: "Sage".into(),
                selected_size: "M".into(),
            },
            CartItem {
                product: product("b", 10),
                quantity: 2,
                selected_color: "Sage".into(),
                selected_size: "M".into(),
            },
        ];
        assert!(store.save(keys::CART, &items));

        let cart = Cart::hydrate(store);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].product.id.as_str(), "b");
    }

    #[test]
    fn test_write_failure_keeps_memory_state() {
        let mut cart = Cart::hydrate(PersistentStore::new(MemoryStore::with_quota(8)));
        cart.add_item(product("a", 10), qty(3), "Sage", "M");
        assert_eq!(cart.total_items(), 3);
        assert!(!cart.persist());
    }

    #[test]
    fn test_snapshot_layout() {
        let store = PersistentStore::in_memory();
        let mut cart = Cart::hydrate(store.clone());
        cart.add_item(product("a", 10), qty(1), "Sage", "M");

        let raw: serde_json::Value =
            serde_json::from_str(&store.load_raw(keys::CART).unwrap()).unwrap();
        let line = &raw[0];
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["selectedColor"], "Sage");
        assert_eq!(line["selectedSize"], "M");
        assert_eq!(line["product"]["id"], "a");
        assert!(line["product"]["price"].is_number());
        assert_eq!(line["product"]["price"].as_f64(), Some(10.0));
        assert!(line["product"]["reviews"]["rating"].is_number());
    }

    fn line(id: &str, quantity: u32) -> CartItem {
        CartItem {
            product: product(id, 10),
            quantity,
            selected_color: "Sage".into(),
            selected_size: "M".into(),
        }
    }

    #[test]
    fn test_duplicate_lines_merged_on_hydrate() {
        let store = PersistentStore::in_memory();
        assert!(store.save(keys::CART, &vec![line("a", 1), line("b", 1), line("a", 2)]));

        let mut cart = Cart::hydrate(store);
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].product.id.as_str(), "a");
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.items()[1].product.id.as_str(), "b");

        cart.add_item(product("a", 10), qty(1), "Sage", "M");
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_update_quantity_persists() {
        let store = PersistentStore::in_memory();
        let mut cart = Cart::hydrate(store.clone());
        cart.add_item(product("a", 10), qty(2), "Sage", "M");
        cart.add_item(product("b", 10), qty(1), "Sage", "M");

        assert!(cart.update_quantity(&ProductId::new("a"), "Sage", "M", 7));
        let reloaded = Cart::hydrate(store.clone());
        assert_eq!(reloaded.items()[0].quantity, 7);
        assert_eq!(reloaded.total_items(), 8);

        assert!(cart.update_quantity(&ProductId::new("a"), "Sage", "M", 0));
        let reloaded = Cart::hydrate(store);
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].product.id.as_str(), "b");
    }

    #[test]
    fn test_remove_item_persists() {
        let store = PersistentStore::in_memory();
        let mut cart = Cart::hydrate(store.clone());
        cart.add_item(product("a", 10), qty(2), "Sage", "M");
        cart.add_item(product("b", 10), qty(1), "Sage", "M");

        assert!(cart.remove_item(&ProductId::new("b"), "Sage", "M"));
        let reloaded = Cart::hydrate(store);
        assert_eq!(reloaded.items(), cart.items());
        assert_eq!(reloaded.items().len(), 1);
        assert_eq!(reloaded.items()[0].product.id.as_str(), "a");
    }
}
