//! Search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{OriginalUri, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::routes::catalog::{ProductCardView, current_page};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search results template.
#[derive(Template, WebTemplate)]
#[template(path = "search.html")]
pub struct SearchTemplate {
    pub query: String,
    pub results: Vec<ProductCardView>,
    /// Same search on the full catalog page.
    pub catalog_url: String,
    pub return_to: String,
}

/// Search store products by name.
///
/// A blank query renders the typing hint instead of results.
#[instrument(skip(state, uri))]
pub async fn search(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<SearchQuery>,
) -> impl IntoResponse {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default().to_string();

    let results = if query.is_empty() {
        Vec::new()
    } else {
        state
            .catalog()
            .search(&query)
            .into_iter()
            .map(ProductCardView::from_product)
            .collect()
    };

    tracing::debug!(query = %query, results = results.len(), "search");

    SearchTemplate {
        catalog_url: format!("/catalog?q={}", urlencoding::encode(&query)),
        query,
        results,
        return_to: current_page(&uri, "/search"),
    }
}
