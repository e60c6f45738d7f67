//! Domain models for the storefront.
//!
//! These are display-oriented records. The catalog owns them immutably; pages
//! derive filtered views from them and never mutate them.

pub mod cart;
pub mod session;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use vitrina_core::{
    CategoryId, OrderNumber, OrderStatus, PaymentStatus, Price, PriceError, ProductId,
    Specifications, TestimonialId,
};

pub use cart::{Cart, CartError, CartLine, CartSource};
pub use session::keys as session_keys;

/// A store product or a spare part.
///
/// Both listings share this shape; parts usually carry a manufacturer and
/// specifications, store products a rating and promotional flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Category label; matched against `Category::name` when filtering.
    pub category: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_price: Option<Price>,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub specifications: Specifications,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default)]
    pub reviews: u32,
    /// Discount in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default)]
    pub is_new: bool,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Rating used for ordering; unrated products sort as zero.
    #[must_use]
    pub fn sort_rating(&self) -> f32 {
        self.rating.unwrap_or(0.0)
    }
}

/// A store category shown as a homepage tile and a catalog filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub description: String,
}

/// A spare-parts category addressed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartCategory {
    pub slug: String,
    pub name: String,
}

/// A product snapshot inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    /// Unit price at the time of purchase.
    pub price: Price,
    pub image: String,
    #[serde(default)]
    pub specifications: Specifications,
}

impl OrderItem {
    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the line total does not fit.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.price.times(self.quantity)
    }
}

/// Delivery details of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    pub method: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
}

/// Payment details of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub method: String,
    pub status: PaymentStatus,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderNumber,
    pub date: NaiveDate,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub delivery: Delivery,
    pub payment: Payment,
}

impl Order {
    /// Sum of all line totals.
    ///
    /// An order without items totals zero roubles.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if line currencies differ or the sum overflows.
    pub fn total(&self) -> Result<Price, PriceError> {
        let mut items = self.items.iter();
        let Some(first) = items.next() else {
            return Ok(Price::zero(vitrina_core::CurrencyCode::default()));
        };
        items.try_fold(first.line_total()?, |acc, item| {
            acc.checked_add(item.line_total()?)
        })
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |total: u32, item| total.saturating_add(item.quantity))
    }
}

/// Customer testimonial shown on the homepage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub company: String,
    pub text: String,
    /// Stars out of five.
    pub rating: u8,
    pub image: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: u32, quantity: u32, price: i64) -> OrderItem {
        OrderItem {
            id: ProductId::new(id),
            name: format!("item {id}"),
            quantity,
            price: Price::rub(price),
            image: String::new(),
            specifications: Specifications::new(),
        }
    }

    fn order(items: Vec<OrderItem>) -> Order {
        Order {
            id: OrderNumber::from("1"),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            status: OrderStatus::Pending,
            items,
            delivery: Delivery {
                method: "Курьер".to_string(),
                address: "ул. Примерная, д. 1".to_string(),
                city: "Москва".to_string(),
                postal_code: "123456".to_string(),
            },
            payment: Payment {
                method: "Картой".to_string(),
                status: PaymentStatus::Pending,
            },
        }
    }

    #[test]
    fn test_order_total_sums_line_totals() {
        let order = order(vec![item(1, 1, 45_000), item(2, 2, 120_000)]);
        assert_eq!(order.total().unwrap(), Price::rub(285_000));
        assert_eq!(order.unit_count(), 3);
    }

    #[test]
    fn test_unit_count_saturates() {
        let order = order(vec![item(1, u32::MAX, 1), item(2, 5, 1)]);
        assert_eq!(order.unit_count(), u32::MAX);
    }

    #[test]
    fn test_empty_order_totals_zero() {
        assert_eq!(order(Vec::new()).total().unwrap(), Price::rub(0));
    }

    #[test]
    fn test_product_defaults_when_deserializing() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 9,
                "name": "Фильтр",
                "category": "Гидравлика",
                "price": {"amount": "1500"},
                "image": "/images/filter.jpg"
            }"#,
        )
        .unwrap();

        assert!(product.in_stock);
        assert!(!product.is_new);
        assert_eq!(product.rating, None);
        assert!(product.specifications.is_empty());
        assert!((product.sort_rating() - 0.0).abs() < f32::EPSILON);
    }
}
