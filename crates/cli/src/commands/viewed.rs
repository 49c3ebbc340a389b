//! `akasha viewed` commands.

use akasha_core::ProductId;
use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::Result;

use super::{open_session, resolve_product};
use crate::ViewedAction;
use crate::output;

pub fn run(config: &StorefrontConfig, action: ViewedAction) -> Result<()> {
    let mut session = open_session(config)?;
    let viewed = &mut session.recently_viewed;

    match action {
        ViewedAction::Add { product_id } => {
            let product = resolve_product(config, &product_id)?;
            viewed.add_item(product);
            output::products("Recently viewed", viewed.items());
        }
        ViewedAction::Clear => {
            viewed.clear();
            output::products("Recently viewed", viewed.items());
        }
        ViewedAction::Show { exclude: None } => {
            output::products("Recently viewed", viewed.items());
        }
        ViewedAction::Show {
            exclude: Some(current),
        } => {
            let current = ProductId::new(current);
            let others: Vec<_> = viewed.excluding(&current).cloned().collect();
            output::products("You may also like", &others);
        }
    }
    Ok(())
}
