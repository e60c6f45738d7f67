//! Catalog filtering and sorting.
//!
//! A [`CatalogQuery`] narrows a product list by category, inclusive price
//! range and name search, then orders it. Everything is in memory over a few
//! dozen records.

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Deserialize;

use vitrina_core::{CategoryId, Price};

use crate::models::{Category, Product};

/// Default lower bound of the catalog price filter.
pub const DEFAULT_PRICE_MIN: i64 = 0;
/// Default upper bound of the catalog price filter.
pub const DEFAULT_PRICE_MAX: i64 = 200_000;

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub fn new(min: impl Into<Decimal>, max: impl Into<Decimal>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// `min <= price <= max`. An inverted range contains nothing.
    #[must_use]
    pub fn contains(&self, price: &Price) -> bool {
        self.min <= price.amount && price.amount <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_MIN, DEFAULT_PRICE_MAX)
    }
}

/// Catalog sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    /// Rating, highest first.
    #[default]
    Popular,
    PriceAsc,
    PriceDesc,
    /// New products first; otherwise input order is kept.
    Newest,
}

impl SortOrder {
    pub const ALL: [Self; 4] = [Self::Popular, Self::PriceAsc, Self::PriceDesc, Self::Newest];

    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "new",
        }
    }

    /// Label shown in the sort select.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Popular => "По популярности",
            Self::PriceAsc => "По возрастанию цены",
            Self::PriceDesc => "По убыванию цены",
            Self::Newest => "По новизне",
        }
    }

    /// Parse a query-string value. Unknown values fall back to `Popular`.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price-asc") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            Some("new") => Self::Newest,
            _ => Self::Popular,
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popular => b.sort_rating().total_cmp(&a.sort_rating()),
            Self::PriceAsc => a.price.amount.cmp(&b.price.amount),
            Self::PriceDesc => b.price.amount.cmp(&a.price.amount),
            Self::Newest => b.is_new.cmp(&a.is_new),
        }
    }
}

/// Raw catalog query-string parameters.
///
/// Everything is a string so malformed values degrade to defaults instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryParams {
    pub category: Option<String>,
    pub min: Option<String>,
    pub max: Option<String>,
    pub sort: Option<String>,
    pub q: Option<String>,
}

/// A resolved catalog view request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    /// Selected category; `None` keeps every category.
    pub category: Option<CategoryId>,
    pub price: PriceRange,
    pub sort: SortOrder,
    /// Case-insensitive name substring.
    pub search: Option<String>,
}

impl CatalogQuery {
    /// Build a query from raw parameters, falling back to defaults for
    /// anything missing or malformed. `category=0` means no category.
    #[must_use]
    pub fn from_params(params: &QueryParams) -> Self {
        let category = params
            .category
            .as_deref()
            .and_then(|s| s.parse::<CategoryId>().ok())
            .filter(|id| id.as_u32() != 0);

        let min = parse_bound(params.min.as_deref()).unwrap_or_else(|| Decimal::from(DEFAULT_PRICE_MIN));
        let max = parse_bound(params.max.as_deref()).unwrap_or_else(|| Decimal::from(DEFAULT_PRICE_MAX));

        let search = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Self {
            category,
            price: PriceRange { min, max },
            sort: SortOrder::from_param(params.sort.as_deref()),
            search,
        }
    }

    /// Filter and sort `products`.
    ///
    /// `categories` resolves the selected category id to the label products
    /// carry. An id that names no category matches nothing.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product], categories: &[Category]) -> Vec<&'a Product> {
        let category_name = self
            .category
            .map(|id| categories.iter().find(|c| c.id == id).map(|c| c.name.as_str()));
        let needle = self.search.as_deref().map(str::to_lowercase);

        let mut result: Vec<&Product> = products
            .iter()
            .filter(|p| match category_name {
                None => true,
                Some(Some(name)) => p.category == name,
                Some(None) => false,
            })
            .filter(|p| self.price.contains(&p.price))
            .filter(|p| {
                needle
                    .as_deref()
                    .is_none_or(|n| p.name.to_lowercase().contains(n))
            })
            .collect();

        let sort = self.sort;
        result.sort_by(|a, b| sort.compare(a, b));
        result
    }
}

fn parse_bound(value: Option<&str>) -> Option<Decimal> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<Decimal>() {
        Ok(bound) => Some(bound),
        Err(e) => {
            tracing::debug!(value, error = %e, "ignoring malformed price bound");
            None
        }
    }
}
