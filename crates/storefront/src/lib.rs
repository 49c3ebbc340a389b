//! AKASHA Storefront library.
//!
//! Shopper session state (cart, wishlist, recently viewed, quick view,
//! recent searches) over a pluggable persistent key-value store, plus the
//! Shopify Storefront API client used by page-level code.
//!
//! # Architecture
//!
//! - [`storage`] - key-value backends and the typed, best-effort JSON adapter
//! - [`session`] - one state manager per concern, owned by [`ShopperSession`]
//! - [`catalog`] - in-memory product catalog with text search
//! - [`shopify`] - Storefront API GraphQL client with optional `moka` caching
//! - [`config`] - environment configuration via `dotenvy`
//!
//! Managers persist their snapshot synchronously after every mutation.
//! Persistence is advisory: a failed write is logged and the in-memory state
//! stays authoritative for the session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod shopify;
pub mod storage;

pub use session::ShopperSession;
