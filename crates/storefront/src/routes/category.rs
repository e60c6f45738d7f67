//! Spare-parts category route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{OriginalUri, Path, Query, State};
use tracing::instrument;

use crate::catalog::{CatalogQuery, QueryParams};
use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::catalog::{
    ProductCardView, SpecRowView, SortOptionView, current_page, sort_options, spec_rows,
};
use crate::state::AppState;

/// Part tile with manufacturer and specification table.
#[derive(Clone)]
pub struct PartView {
    pub card: ProductCardView,
    pub manufacturer: Option<String>,
    pub specifications: Vec<SpecRowView>,
}

/// Spare-parts category page template.
#[derive(Template, WebTemplate)]
#[template(path = "category/show.html")]
pub struct CategoryShowTemplate {
    pub slug: String,
    pub name: String,
    pub parts: Vec<PartView>,
    pub sort_options: Vec<SortOptionView>,
    pub min: String,
    pub max: String,
    pub search: String,
    /// Where add-to-cart should return to.
    pub return_to: String,
}

/// Display the parts of one category.
///
/// Takes the same `q`, `min`, `max` and `sort` parameters as the catalog;
/// `category` is ignored since the slug already selects it.
#[instrument(skip(state, uri))]
pub async fn show(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(slug): Path<String>,
    Query(params): Query<QueryParams>,
) -> Result<CategoryShowTemplate> {
    let catalog = state.catalog();
    let category = catalog
        .part_category(&slug)
        .ok_or_else(|| AppError::NotFound(format!("категория {slug}")))?;

    let query = CatalogQuery {
        category: None,
        ..CatalogQuery::from_params(&params)
    };

    let parts: Vec<PartView> = query
        .apply(&catalog.parts, &[])
        .into_iter()
        .filter(|p| p.category == category.name)
        .map(|p| PartView {
            card: ProductCardView::from_part(p),
            manufacturer: p.manufacturer.clone(),
            specifications: spec_rows(&p.specifications),
        })
        .collect();

    tracing::debug!(slug = %slug, results = parts.len(), "parts filtered");

    Ok(CategoryShowTemplate {
        return_to: current_page(&uri, &format!("/catalog/category/{}", category.slug)),
        slug: category.slug.clone(),
        name: category.name.clone(),
        parts,
        sort_options: sort_options(query.sort),
        min: query.price.min.normalize().to_string(),
        max: query.price.max.normalize().to_string(),
        search: query.search.unwrap_or_default(),
    })
}
