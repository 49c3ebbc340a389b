//! AKASHA Core - Shared domain types.
//!
//! This crate provides the types shared by every AKASHA component:
//! - `storefront` - Shopper session state and the Storefront API client
//! - `cli` - Command-line front end over the session state
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product catalog entities, type-safe IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
