//! Shopper session state.
//!
//! Each concern has its own manager that owns its state exclusively and
//! persists it under its own storage key:
//!
//! | Manager | Key | Persisted |
//! |---|---|---|
//! | [`Cart`] | `akasha-cart` | yes |
//! | [`Wishlist`] | `akasha-wishlist` | yes |
//! | [`RecentlyViewed`] | `akasha-recently-viewed` | yes |
//! | [`RecentSearches`] | `akasha-recent-searches` | yes |
//! | [`WelcomePopup`] | `akasha-popup-seen` | yes |
//! | [`SharedQuickView`] | - | no |
//!
//! [`ShopperSession`] bundles one instance of each over a shared store and is
//! passed to whatever renders the storefront.

pub mod cart;
pub mod quick_view;
pub mod recent_searches;
pub mod recently_viewed;
pub mod welcome_popup;
pub mod wishlist;

pub use cart::{Cart, CartItem, FREE_SHIPPING_THRESHOLD};
pub use quick_view::{CLOSE_DELAY, CloseTicket, QuickView, SharedQuickView};
pub use recent_searches::{MAX_RECENT_SEARCHES, RecentSearches};
pub use recently_viewed::{MAX_RECENTLY_VIEWED, RecentlyViewed};
pub use welcome_popup::WelcomePopup;
pub use wishlist::Wishlist;

use tracing::{info, warn};

use crate::storage::PersistentStore;

/// All state for one shopper, hydrated from a single store.
#[derive(Debug)]
pub struct ShopperSession {
    pub cart: Cart,
    pub wishlist: Wishlist,
    pub recently_viewed: RecentlyViewed,
    pub recent_searches: RecentSearches,
    pub welcome_popup: WelcomePopup,
    pub quick_view: SharedQuickView,
}

impl ShopperSession {
    /// Hydrate every persisted manager from `store`.
    ///
    /// Never fails: missing or corrupt snapshots start that manager empty.
    #[must_use]
    pub fn hydrate(store: &PersistentStore) -> Self {
        let session = Self {
            cart: Cart::hydrate(store.clone()),
            wishlist: Wishlist::hydrate(store.clone()),
            recently_viewed: RecentlyViewed::hydrate(store.clone()),
            recent_searches: RecentSearches::hydrate(store.clone()),
            welcome_popup: WelcomePopup::hydrate(store.clone()),
            quick_view: SharedQuickView::new(),
        };

        info!(
            cart_lines = session.cart.items().len(),
            wishlist = session.wishlist.total_items(),
            recently_viewed = session.recently_viewed.len(),
            "Hydrated shopper session"
        );
        session
    }

    /// Rewrite every persisted snapshot. Returns whether all writes
    /// succeeded.
    pub fn flush(&self) -> bool {
        let results = [
            self.cart.persist(),
            self.wishlist.persist(),
            self.recently_viewed.persist(),
            self.recent_searches.persist(),
            self.welcome_popup.persist(),
        ];
        let ok = results.iter().all(|&ok| ok);
        if !ok {
            warn!("Some session snapshots could not be flushed");
        }
        ok
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use akasha_core::{ColorVariant, Product, ProductId};
    use rust_decimal::Decimal;

    /// A minimal product with the given id and whole-dollar price.
    pub fn product(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(price, 0),
            original_price: None,
            images: vec![format!("/images/{id}.jpg")],
            colors: vec![ColorVariant {
                name: "Sage".to_string(),
                hex: "#9CAF88".to_string(),
            }],
            sizes: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            category: "tops".to_string(),
            movements: Vec::new(),
            is_new: false,
            is_best_seller: false,
            reviews: akasha_core::ReviewSummary::default(),
            short_description: String::new(),
            description: String::new(),
            materials: Vec::new(),
            intensity: None,
        }
    }
}
