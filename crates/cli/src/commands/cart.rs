//! `akasha cart` commands.

use std::num::NonZeroU32;

use akasha_core::{Product, ProductId};
use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::{AppError, Result, add_breadcrumb};
use tracing::info;

use super::{open_session, resolve_product};
use crate::CartAction;
use crate::output;

pub fn run(config: &StorefrontConfig, action: CartAction) -> Result<()> {
    let mut session = open_session(config)?;
    let cart = &mut session.cart;

    match action {
        CartAction::Add {
            product_id,
            color,
            size,
            quantity,
        } => {
            let quantity = NonZeroU32::new(quantity)
                .ok_or_else(|| AppError::BadRequest("quantity must be at least 1".to_string()))?;
            let product = resolve_product(config, &product_id)?;
            let color = select_color(&product, color)?;
            check_size(&product, &size)?;

            add_breadcrumb(
                "cart",
                "Added to cart",
                Some(&[("product_id", product_id.as_str()), ("size", size.as_str())]),
            );
            cart.add_item(product, quantity, color, size);
            info!(product_id = %product_id, total_items = cart.total_items(), "Added to cart");
        }
        CartAction::Remove {
            product_id,
            color,
            size,
        } => {
            if !cart.remove_item(&ProductId::new(product_id), &color, &size) {
                info!("No matching cart line");
            }
        }
        CartAction::Update {
            product_id,
            color,
            size,
            quantity,
        } => {
            if !cart.update_quantity(&ProductId::new(product_id), &color, &size, quantity) {
                info!("No matching cart line");
            }
        }
        CartAction::Clear => cart.clear(),
        CartAction::Show => {}
    }

    output::cart(cart);
    Ok(())
}

/// The requested color, or the product's first color when none was given.
fn select_color(product: &Product, requested: Option<String>) -> Result<String> {
    match requested {
        Some(color) if product.has_color(&color) => Ok(color),
        Some(color) => Err(AppError::BadRequest(format!(
            "{} does not come in {color}",
            product.name
        ))),
        None => product
            .colors
            .first()
            .map(|c| c.name.clone())
            .ok_or_else(|| AppError::BadRequest(format!("{} has no colors", product.name))),
    }
}

fn check_size(product: &Product, size: &str) -> Result<()> {
    if product.has_size(size) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{} does not come in size {size} (available: {})",
            product.name,
            product.sizes.join(", ")
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product() -> Product {
        serde_json::from_str(
            r##"{"id": "sage-tank", "name": "Sage Tank", "price": 58,
                "colors": [{"name": "Sage", "hex": "#9CAF88"}, {"name": "Black", "hex": "#000000"}],
                "sizes": ["S", "M"]}"##,
        )
        .unwrap()
    }

    #[test]
    fn test_select_color_defaults_to_first() {
        assert_eq!(select_color(&product(), None).unwrap(), "Sage");
        assert_eq!(
            select_color(&product(), Some("Black".to_string())).unwrap(),
            "Black"
        );
        assert!(select_color(&product(), Some("Red".to_string())).is_err());
    }

    #[test]
    fn test_check_size() {
        assert!(check_size(&product(), "M").is_ok());
        assert!(matches!(
            check_size(&product(), "XL"),
            Err(AppError::BadRequest(_))
        ));
    }
}
