//! Type-safe price representation using decimal arithmetic.
//!
//! Prices render the way Russian shoppers read them: the integer part is
//! grouped by thousands with a no-break space, the fraction uses a comma and
//! is omitted when zero, and the currency symbol trails the amount.
//!
//! ```rust
//! use vitrina_core::Price;
//!
//! assert_eq!(Price::rub(89_990).to_string(), "89\u{a0}990 ₽");
//! ```

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// No-break space used as the thousands separator.
const GROUP_SEPARATOR: char = '\u{a0}';

/// Errors from price arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Two prices in different currencies were combined.
    #[error("currency mismatch: {0:?} vs {1:?}")]
    CurrencyMismatch(CurrencyCode, CurrencyCode),
    /// The result does not fit in a decimal.
    #[error("price overflow")]
    Overflow,
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., roubles, not kopecks).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a whole-rouble price.
    #[must_use]
    pub fn rub(amount: i64) -> Self {
        Self::new(Decimal::from(amount), CurrencyCode::RUB)
    }

    /// A zero amount in the given currency.
    #[must_use]
    pub const fn zero(currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::ZERO, currency_code)
    }

    /// Multiply by a quantity (line total).
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the product does not fit.
    pub fn times(self, quantity: u32) -> Result<Self, PriceError> {
        self.amount
            .checked_mul(Decimal::from(quantity))
            .map(|amount| Self::new(amount, self.currency_code))
            .ok_or(PriceError::Overflow)
    }

    /// Add two prices of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::CurrencyMismatch` when currencies differ and
    /// `PriceError::Overflow` if the sum does not fit.
    pub fn checked_add(self, other: Self) -> Result<Self, PriceError> {
        if self.currency_code != other.currency_code {
            return Err(PriceError::CurrencyMismatch(
                self.currency_code,
                other.currency_code,
            ));
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
            .ok_or(PriceError::Overflow)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            format_amount(self.amount),
            self.currency_code.symbol()
        )
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    RUB,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::RUB => "₽",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}

/// Format an amount with grouped thousands and an optional two-digit fraction.
fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();
    let integer = abs.trunc();
    let fraction = abs - integer;

    let integer_digits = integer.to_string();
    let integer_digits = integer_digits
        .split('.')
        .next()
        .unwrap_or(integer_digits.as_str());

    let mut grouped = String::with_capacity(integer_digits.len() + integer_digits.len() / 3);
    for (i, c) in integer_digits.chars().enumerate() {
        if i > 0 && (integer_digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(c);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);

    if !fraction.is_zero() {
        let cents = (fraction * Decimal::ONE_HUNDRED).trunc().to_u32().unwrap_or(0);
        out.push_str(&format!(",{cents:02}"));
    }

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::rub(89_990).to_string(), "89\u{a0}990 ₽");
        assert_eq!(Price::rub(199_990).to_string(), "199\u{a0}990 ₽");
        assert_eq!(Price::rub(1_250_000).to_string(), "1\u{a0}250\u{a0}000 ₽");
    }

    #[test]
    fn test_display_small_amounts_are_not_grouped() {
        assert_eq!(Price::rub(0).to_string(), "0 ₽");
        assert_eq!(Price::rub(999).to_string(), "999 ₽");
    }

    #[test]
    fn test_display_fraction_only_when_non_zero() {
        let price = Price::new(Decimal::new(1_999_950, 2), CurrencyCode::RUB);
        assert_eq!(price.to_string(), "19\u{a0}999,50 ₽");

        let whole = Price::new(Decimal::new(500_000, 2), CurrencyCode::RUB);
        assert_eq!(whole.to_string(), "5\u{a0}000 ₽");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(Price::rub(-1500).to_string(), "-1\u{a0}500 ₽");
    }

    #[test]
    fn test_times_quantity() {
        assert_eq!(Price::rub(120_000).times(2).unwrap(), Price::rub(240_000));
        assert_eq!(Price::rub(120_000).times(0).unwrap(), Price::rub(0));
    }

    #[test]
    fn test_checked_add_same_currency() {
        let sum = Price::rub(45_000).checked_add(Price::rub(240_000)).unwrap();
        assert_eq!(sum, Price::rub(285_000));
    }

    #[test]
    fn test_checked_add_rejects_mixed_currencies() {
        let usd = Price::new(Decimal::from(10), CurrencyCode::USD);
        let err = Price::rub(10).checked_add(usd).unwrap_err();
        assert_eq!(
            err,
            PriceError::CurrencyMismatch(CurrencyCode::RUB, CurrencyCode::USD)
        );
    }

    #[test]
    fn test_deserialize_defaults_to_rub() {
        let price: Price = serde_json::from_str(r#"{"amount":"24990"}"#).unwrap();
        assert_eq!(price, Price::rub(24_990));
    }
}
