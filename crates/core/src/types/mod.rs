//! Core types for AKASHA.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{ColorVariant, Intensity, Product, ReviewSummary};
