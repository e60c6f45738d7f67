//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (catalog loaded)
//!
//! # Catalog
//! GET  /catalog                   - Product listing (?category, min, max, sort, q)
//! GET  /catalog/product/{id}      - Product detail
//! GET  /catalog/category/{slug}   - Spare-parts category (?q, min, max, sort)
//! GET  /search                    - Search results (?q)
//!
//! # Orders
//! GET  /profile/orders            - Order history
//! GET  /profile/orders/{id}       - Order detail
//!
//! # Cart (session)
//! GET  /cart                      - Cart page
//! POST /cart/add                  - Add product (source, id, redirect)
//! POST /cart/remove               - Remove line (index)
//! POST /cart/clear                - Empty the cart
//! GET  /cart/count                - Cart count badge (fragment)
//! ```

pub mod cart;
pub mod catalog;
pub mod category;
pub mod home;
pub mod orders;
pub mod search;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/product/{id}", get(catalog::show))
        .route("/category/{slug}", get(category::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/{id}", get(orders::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/search", get(search::search))
        .nest("/catalog", catalog_routes())
        .nest("/profile/orders", order_routes())
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the catalog has no products.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
