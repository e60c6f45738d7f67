//! Catalog route handlers.
//!
//! The listing keeps its view state (category, price range, sort order,
//! search text) in the query string so filtered views are linkable.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{OriginalUri, Path, Query, State},
    response::IntoResponse,
};
use tracing::instrument;

use vitrina_core::ProductId;

use crate::catalog::{CatalogQuery, QueryParams, SortOrder};
use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{CartSource, Category, Product};
use crate::state::AppState;

/// Number of related products on the product page.
const RELATED_PRODUCTS: usize = 3;

/// Product tile data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: u32,
    pub url: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub old_price: Option<String>,
    pub image: String,
    pub rating: Option<String>,
    pub reviews: u32,
    pub discount: Option<u8>,
    pub is_new: bool,
    pub in_stock: bool,
    /// Form value telling the cart which listing the id belongs to.
    pub cart_source: &'static str,
}

impl ProductCardView {
    /// Tile for a store product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self::build(product, CartSource::Catalog)
    }

    /// Tile for a spare part. Parts have no detail page of their own; the
    /// tile links back to its category listing.
    #[must_use]
    pub fn from_part(product: &Product) -> Self {
        Self::build(product, CartSource::Parts)
    }

    fn build(product: &Product, source: CartSource) -> Self {
        let url = match source {
            CartSource::Catalog => format!("/catalog/product/{}", product.id),
            CartSource::Parts => "#".to_string(),
        };
        Self {
            id: product.id.as_u32(),
            url,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.to_string(),
            old_price: product.old_price.map(|p| p.to_string()),
            image: product.image.clone(),
            rating: product.rating.map(|r| format!("{r:.1}")),
            reviews: product.reviews,
            discount: product.discount,
            is_new: product.is_new,
            in_stock: product.in_stock,
            cart_source: cart_source_value(source),
        }
    }
}

/// Form value for a cart source.
#[must_use]
pub const fn cart_source_value(source: CartSource) -> &'static str {
    match source {
        CartSource::Catalog => "catalog",
        CartSource::Parts => "parts",
    }
}

/// Key/value row of a specification table.
#[derive(Clone)]
pub struct SpecRowView {
    pub key: String,
    pub value: String,
}

/// Specification rows in source order.
#[must_use]
pub fn spec_rows(specs: &vitrina_core::Specifications) -> Vec<SpecRowView> {
    specs
        .iter()
        .map(|(key, value)| SpecRowView {
            key: key.to_string(),
            value: value.to_string(),
        })
        .collect()
}

/// Category radio option.
#[derive(Clone)]
pub struct CategoryOptionView {
    pub id: u32,
    pub name: String,
    pub selected: bool,
}

/// Sort select option.
#[derive(Clone)]
pub struct SortOptionView {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Options for the sort select with the active order marked.
#[must_use]
pub fn sort_options(active: SortOrder) -> Vec<SortOptionView> {
    SortOrder::ALL
        .iter()
        .map(|order| SortOptionView {
            value: order.as_str(),
            label: order.label(),
            selected: *order == active,
        })
        .collect()
}

/// Catalog listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub products: Vec<ProductCardView>,
    pub categories: Vec<CategoryOptionView>,
    pub any_category: bool,
    pub sort_options: Vec<SortOptionView>,
    pub min: String,
    pub max: String,
    pub search: String,
    /// Where add-to-cart should return to.
    pub return_to: String,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductCardView,
    pub description: Option<String>,
    pub manufacturer: Option<String>,
    pub specifications: Vec<SpecRowView>,
    pub category_id: Option<u32>,
    pub related: Vec<ProductCardView>,
    pub return_to: String,
}

fn category_options(categories: &[Category], query: &CatalogQuery) -> Vec<CategoryOptionView> {
    categories
        .iter()
        .map(|c| CategoryOptionView {
            id: c.id.as_u32(),
            name: c.name.clone(),
            selected: query.category == Some(c.id),
        })
        .collect()
}

/// Path and query of the current page, used as the add-to-cart return target.
pub(crate) fn current_page(uri: &axum::http::Uri, fallback: &str) -> String {
    uri.path_and_query()
        .map_or_else(|| fallback.to_string(), |pq| pq.as_str().to_string())
}

/// Display the catalog listing.
#[instrument(skip(state, uri))]
pub async fn index(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<QueryParams>,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let query = CatalogQuery::from_params(&params);

    let products: Vec<ProductCardView> = query
        .apply(&catalog.products, &catalog.categories)
        .into_iter()
        .map(ProductCardView::from_product)
        .collect();

    tracing::debug!(results = products.len(), "catalog filtered");

    CatalogIndexTemplate {
        products,
        categories: category_options(&catalog.categories, &query),
        any_category: query.category.is_none(),
        sort_options: sort_options(query.sort),
        min: query.price.min.normalize().to_string(),
        max: query.price.max.normalize().to_string(),
        search: query.search.unwrap_or_default(),
        return_to: current_page(&uri, "/catalog"),
    }
}

/// Display a product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let catalog = state.catalog();
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| catalog.product(id))
        .ok_or_else(|| AppError::NotFound(format!("товар {id}")))?;

    let related = catalog
        .products
        .iter()
        .filter(|p| p.category == product.category && p.id != product.id)
        .take(RELATED_PRODUCTS)
        .map(ProductCardView::from_product)
        .collect();

    let category_id = catalog
        .categories
        .iter()
        .find(|c| c.name == product.category)
        .map(|c| c.id.as_u32());

    let card = ProductCardView::from_product(product);
    Ok(ProductShowTemplate {
        return_to: card.url.clone(),
        product: card,
        description: product.description.clone(),
        manufacturer: product.manufacturer.clone(),
        specifications: spec_rows(&product.specifications),
        category_id,
        related,
    })
}
