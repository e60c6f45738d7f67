//! Session-related types.
//!
//! Keys for values stored in the visitor's session.

/// Session keys for storefront data.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}
