//! Core types for Vitrina.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod specification;
pub mod status;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use specification::{SpecValue, Specifications};
pub use status::*;
