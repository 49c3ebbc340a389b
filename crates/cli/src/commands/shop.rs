//! `akasha shop` commands against the Storefront API.

use akasha_storefront::config::StorefrontConfig;
use akasha_storefront::error::{AppError, Result};
use akasha_storefront::shopify::StorefrontClient;

use crate::ShopAction;
use crate::output;

pub async fn run(config: &StorefrontConfig, action: ShopAction) -> Result<()> {
    let shopify = config.shopify.as_ref().ok_or_else(|| {
        AppError::NotConfigured(
            "set SHOPIFY_STORE_DOMAIN and SHOPIFY_STOREFRONT_ACCESS_TOKEN".to_string(),
        )
    })?;
    let client = StorefrontClient::new(shopify);

    match action {
        ShopAction::Name => output::line(&client.shop_name().await?),
        ShopAction::Endpoint => output::line(client.endpoint()),
        ShopAction::Query {
            document,
            variables,
        } => {
            let variables = variables
                .map(|raw| serde_json::from_str::<serde_json::Value>(&raw))
                .transpose()
                .map_err(|e| AppError::BadRequest(format!("invalid --variables JSON: {e}")))?;
            let data: serde_json::Value = client.query(&document, variables).await?;
            output::json(&data);
        }
    }
    Ok(())
}
