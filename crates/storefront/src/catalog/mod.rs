//! Catalog data source.
//!
//! The catalog is loaded once at startup, either from the built-in mock data
//! or from a JSON file with the same shape, and is immutable afterwards.
//! Handlers share it through `AppState` and derive filtered views per request.

mod mock;
pub mod query;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use vitrina_core::{CategoryId, ProductId};

use crate::models::{Category, Order, PartCategory, Product};

pub use query::{CatalogQuery, PriceRange, QueryParams, SortOrder};

/// Number of products shown in the homepage "popular" block when the catalog
/// does not name its featured products.
pub const DEFAULT_FEATURED_COUNT: usize = 3;

/// Errors loading or exporting a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog JSON is malformed.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// All browsable storefront data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Store products listed on `/catalog`.
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    /// Spare parts listed on `/catalog/category/{slug}`.
    #[serde(default)]
    pub parts: Vec<Product>,
    #[serde(default)]
    pub part_categories: Vec<PartCategory>,
    #[serde(default)]
    pub orders: Vec<Order>,
    /// Products promoted on the homepage, in display order.
    #[serde(default)]
    pub featured: Vec<ProductId>,
}

impl Catalog {
    /// The built-in demonstration catalog.
    #[must_use]
    pub fn mock() -> Self {
        mock::catalog()
    }

    /// Parse a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the JSON does not match the catalog shape.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.warn_on_duplicate_ids();
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Io` if the file cannot be read and
    /// `CatalogError::Parse` if it is not a valid catalog.
    #[instrument]
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            products = catalog.products.len(),
            parts = catalog.parts.len(),
            orders = catalog.orders.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Serialize the catalog as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// True when there is nothing to browse.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty() && self.parts.is_empty()
    }

    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn part(&self, id: ProductId) -> Option<&Product> {
        self.parts.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn part_category(&self, slug: &str) -> Option<&PartCategory> {
        self.part_categories.iter().find(|c| c.slug == slug)
    }

    /// Parts whose category label matches the part category with `slug`.
    #[must_use]
    pub fn parts_in(&self, slug: &str) -> Vec<&Product> {
        self.part_category(slug).map_or_else(Vec::new, |category| {
            self.parts
                .iter()
                .filter(|p| p.category == category.name)
                .collect()
        })
    }

    #[must_use]
    pub fn order(&self, number: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id.as_str() == number)
    }

    /// Homepage products: the `featured` list, or the first few products when
    /// it is empty. Unknown featured ids are skipped.
    #[must_use]
    pub fn featured_products(&self) -> Vec<&Product> {
        if self.featured.is_empty() {
            return self.products.iter().take(DEFAULT_FEATURED_COUNT).collect();
        }
        self.featured
            .iter()
            .filter_map(|id| self.product(*id))
            .collect()
    }

    /// Products whose name contains `text` (case-insensitive), any price,
    /// in catalog order.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<&Product> {
        let text = text.trim();
        if text.is_empty() {
            return Vec::new();
        }
        let needle = text.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    fn warn_on_duplicate_ids(&self) {
        for (listing, products) in [("products", &self.products), ("parts", &self.parts)] {
            let mut seen = HashSet::new();
            for product in products {
                if !seen.insert(product.id) {
                    tracing::warn!(listing, id = %product.id, "duplicate product id in catalog");
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_shape() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.products.len(), 6);
        assert_eq!(catalog.categories.len(), 4);
        assert_eq!(catalog.parts.len(), 2);
        assert_eq!(catalog.orders.len(), 1);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::mock();
        assert_eq!(
            catalog.product(ProductId::new(2)).unwrap().name,
            "MacBook Pro M2"
        );
        assert_eq!(catalog.part(ProductId::new(2)).unwrap().name, "Гусеничная цепь");
        assert_eq!(
            catalog.category(CategoryId::new(4)).unwrap().name,
            "Бытовая техника"
        );
        assert!(catalog.product(ProductId::new(404)).is_none());
        assert!(catalog.order("123456").is_some());
        assert!(catalog.order("000000").is_none());
    }

    #[test]
    fn test_parts_in_slug() {
        let catalog = Catalog::mock();
        let hydraulics = catalog.parts_in("hydraulics");
        assert_eq!(hydraulics.len(), 1);
        assert_eq!(hydraulics.first().unwrap().manufacturer.as_deref(), Some("Komatsu"));
        assert!(catalog.parts_in("unknown").is_empty());
    }

    #[test]
    fn test_featured_products_follow_configured_order() {
        let catalog = Catalog::mock();
        let featured: Vec<_> = catalog
            .featured_products()
            .iter()
            .map(|p| p.id.as_u32())
            .collect();
        assert_eq!(featured, vec![1, 2, 3]);
    }

    #[test]
    fn test_featured_products_fall_back_to_first_products() {
        let mut catalog = Catalog::mock();
        catalog.featured.clear();
        assert_eq!(catalog.featured_products().len(), DEFAULT_FEATURED_COUNT);

        catalog.featured = vec![ProductId::new(6), ProductId::new(99)];
        let featured = catalog.featured_products();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured.first().unwrap().name, "Gaming PC RTX 4080");
    }

    #[test]
    fn test_search() {
        let catalog = Catalog::mock();
        assert_eq!(catalog.search("iphone").len(), 1);
        assert_eq!(catalog.search("PRO").len(), 3);
        assert!(catalog.search("   ").is_empty());
        assert!(catalog.search("холодильник").is_empty());
    }

    #[test]
    fn test_json_export_reloads_identically() {
        let catalog = Catalog::mock();
        let json = catalog.to_json_pretty().unwrap();
        let reloaded = Catalog::from_json_str(&json).unwrap();

        assert_eq!(reloaded.products, catalog.products);
        assert_eq!(reloaded.parts, catalog.parts);
        assert_eq!(reloaded.orders, catalog.orders);
        assert_eq!(reloaded.featured, catalog.featured);
    }

    #[test]
    fn test_from_json_str_minimal() {
        let catalog = Catalog::from_json_str(r#"{"products": [], "categories": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        let err = Catalog::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = Catalog::from_json_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
