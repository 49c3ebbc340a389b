//! Catalog product entity.
//!
//! Products are owned by the catalog data source. Session state (cart,
//! wishlist, recently viewed) stores full copies of them so a persisted
//! snapshot can be rendered without another catalog round trip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{MovementId, ProductId};
use super::price::Price;

/// A product as shown in the storefront catalog.
///
/// Serialized in camelCase with numeric prices so snapshots stay compatible
/// with the documents the web storefront keeps in browser storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Current unit selling price in USD.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Compare-at price, shown struck through when present.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ColorVariant>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub movements: Vec<MovementId>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub reviews: ReviewSummary,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
}

impl Product {
    /// Unit price with currency.
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Whether the product is discounted against its compare-at price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Whether `name` is one of the product's color variants.
    #[must_use]
    pub fn has_color(&self, name: &str) -> bool {
        self.colors.iter().any(|c| c.name == name)
    }

    /// Whether `label` is one of the product's size labels.
    #[must_use]
    pub fn has_size(&self, label: &str) -> bool {
        self.sizes.iter().any(|s| s == label)
    }
}

/// A color variant: display name plus swatch color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorVariant {
    pub name: String,
    /// Swatch color as a CSS hex string (e.g., `#9CAF88`).
    pub hex: String,
}

/// Aggregate review summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReviewSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub count: u32,
}

/// Workout intensity a garment is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}
