//! Vitrina Core - Shared value types.
//!
//! This crate provides the value types used across the Vitrina components:
//! - `storefront` - Server-rendered storefront (catalog, parts, orders, cart)
//! - `cli` - Command-line tools for browsing and exporting the catalog
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP, no
//! templates. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, statuses and
//!   specification values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
