//! Session-scoped shopping cart.
//!
//! The cart is an ordered list of product snapshots. Adding the same product
//! twice yields two lines, mirroring how visitors click "add" repeatedly. The
//! cart lives only in the session store and is never persisted.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use vitrina_core::{CurrencyCode, Price, PriceError, ProductId};

use super::Product;

/// Cart operation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Tried to remove a line that does not exist.
    #[error("cart line {index} out of range (cart has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Line prices could not be summed.
    #[error("price error: {0}")]
    Price(#[from] PriceError),
}

/// Which listing a cart line came from.
///
/// Store products and spare parts have independent id spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartSource {
    #[default]
    Catalog,
    Parts,
}

/// A product snapshot in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub source: CartSource,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl CartLine {
    /// Snapshot a product for the cart.
    #[must_use]
    pub fn snapshot(source: CartSource, product: &Product) -> Self {
        Self {
            source,
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
        }
    }
}

/// The visitor's cart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line at the end.
    pub fn add(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    /// Remove the line at `index`, shifting later lines down.
    ///
    /// # Errors
    ///
    /// Returns `CartError::LineOutOfRange` if there is no such line.
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(self.lines.remove(index))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line prices.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Price` if line currencies differ or the sum overflows.
    pub fn subtotal(&self) -> Result<Price, CartError> {
        let currency = self
            .lines
            .first()
            .map_or_else(CurrencyCode::default, |line| line.price.currency_code);
        let total = self
            .lines
            .iter()
            .try_fold(Price::zero(currency), |acc, line| acc.checked_add(line.price))?;
        Ok(total)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: u32, price: i64) -> CartLine {
        CartLine {
            source: CartSource::Parts,
            product_id: ProductId::new(id),
            name: format!("part {id}"),
            price: Price::rub(price),
            image: String::new(),
        }
    }

    #[test]
    fn test_add_keeps_insertion_order_and_duplicates() {
        let mut cart = Cart::new();
        cart.add(line(1, 45_000));
        cart.add(line(2, 120_000));
        cart.add(line(1, 45_000));

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.as_u32()).collect();
        assert_eq!(ids, vec![1, 2, 1]);
        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        assert_eq!(cart.subtotal().unwrap(), Price::rub(0));

        cart.add(line(1, 45_000));
        cart.add(line(2, 120_000));
        assert_eq!(cart.subtotal().unwrap(), Price::rub(165_000));
    }

    #[test]
    fn test_remove_shifts_lines() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        cart.add(line(2, 20));
        cart.add(line(3, 30));

        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.product_id, ProductId::new(2));
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product_id.as_u32()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        assert_eq!(
            cart.remove(5),
            Err(CartError::LineOutOfRange { index: 5, len: 1 })
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(line(1, 10));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_survives_json_round_trip_for_session_storage() {
        let mut cart = Cart::new();
        cart.add(line(7, 999));
        let value = serde_json::to_value(&cart).unwrap();
        let restored: Cart = serde_json::from_value(value).unwrap();
        assert_eq!(restored, cart);
    }
}
