//! Status enums for orders and payments.
//!
//! Each status carries its presentation lookup (icon, label, CSS classes).
//! These tables are fixed; nothing in the storefront transitions a status.

use serde::{Deserialize, Serialize};

/// Order fulfillment stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// All statuses in fulfillment order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
    ];

    /// Icon name (Lucide icon set) shown next to the status badge.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Pending => "clock",
            Self::Processing => "package",
            Self::Shipped => "truck",
            Self::Delivered => "check-circle",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Ожидает обработки",
            Self::Processing => "В обработке",
            Self::Shipped => "Отправлен",
            Self::Delivered => "Доставлен",
        }
    }

    /// Badge color classes.
    #[must_use]
    pub const fn badge_class(self) -> &'static str {
        match self {
            Self::Pending => "bg-yellow-100 text-yellow-800",
            Self::Processing => "bg-blue-100 text-blue-800",
            Self::Shipped => "bg-purple-100 text-purple-800",
            Self::Delivered => "bg-green-100 text-green-800",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

impl PaymentStatus {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Ожидает оплаты",
            Self::Completed => "Оплачено",
        }
    }

    /// Text color class.
    #[must_use]
    pub const fn text_class(self) -> &'static str {
        match self {
            Self::Pending => "text-yellow-600",
            Self::Completed => "text-green-600",
        }
    }
}
