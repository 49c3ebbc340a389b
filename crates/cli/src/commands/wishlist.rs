//! `akasha wishlist` commands.

use akasha_core::ProductId;
use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::{Result, add_breadcrumb};
use tracing::info;

use super::{open_session, resolve_product};
use crate::WishlistAction;
use crate::output;

pub fn run(config: &StorefrontConfig, action: WishlistAction) -> Result<()> {
    let mut session = open_session(config)?;
    let wishlist = &mut session.wishlist;

    match action {
        WishlistAction::Toggle { product_id } => {
            let product = resolve_product(config, &product_id)?;
            let saved = wishlist.toggle_item(product);
            add_breadcrumb(
                "wishlist",
                if saved { "Saved to wishlist" } else { "Removed from wishlist" },
                Some(&[("product_id", product_id.as_str())]),
            );
            info!(product_id = %product_id, saved, "Toggled wishlist");
        }
        WishlistAction::Add { product_id } => {
            let product = resolve_product(config, &product_id)?;
            if !wishlist.add_item(product) {
                info!(product_id = %product_id, "Already in wishlist");
            }
        }
        WishlistAction::Remove { product_id } => {
            if !wishlist.remove_item(&ProductId::new(product_id.as_str())) {
                info!(product_id = %product_id, "Not in wishlist");
            }
        }
        WishlistAction::Clear => wishlist.clear(),
        WishlistAction::Show => {}
    }

    output::products("Wishlist", wishlist.items());
    Ok(())
}
