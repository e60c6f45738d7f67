//! Cart route handlers.
//!
//! The cart lives in the session. Forms post and redirect back so every
//! page works without JavaScript; the header badge polls `/cart/count`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::uri::PathAndQuery,
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use vitrina_core::ProductId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{Cart, CartLine, CartSource, session_keys};
use crate::routes::catalog::cart_source_value;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    /// Position in the cart, posted back by the remove form.
    pub index: usize,
    pub url: Option<String>,
    pub name: String,
    pub price: String,
    pub image: String,
    pub source: &'static str,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: usize,
}

impl TryFrom<&Cart> for CartView {
    type Error = AppError;

    fn try_from(cart: &Cart) -> Result<Self> {
        let items = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(index, line)| CartItemView {
                index,
                url: match line.source {
                    CartSource::Catalog => Some(format!("/catalog/product/{}", line.product_id)),
                    CartSource::Parts => None,
                },
                name: line.name.clone(),
                price: line.price.to_string(),
                image: line.image.clone(),
                source: cart_source_value(line.source),
            })
            .collect();

        Ok(Self {
            items,
            subtotal: cart.subtotal()?.to_string(),
            item_count: cart.len(),
        })
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session; a missing cart is empty.
async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

/// Only same-site paths are followed after a cart action.
///
/// Browsers read `\` as `/` and drop tabs and newlines, so either could turn
/// a local-looking path into a scheme-relative URL.
fn redirect_target(redirect: Option<&str>) -> &str {
    redirect
        .filter(|r| is_local_path(r))
        .unwrap_or("/cart")
}

fn is_local_path(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.chars().any(|c| c == '\\' || c.is_control())
        && target.parse::<PathAndQuery>().is_ok()
}

// =============================================================================
// Forms and Templates
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(default)]
    pub source: CartSource,
    pub id: ProductId,
    pub redirect: Option<String>,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    Ok(CartShowTemplate {
        cart: CartView::try_from(&cart)?,
    })
}

/// Append a product snapshot and redirect back.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let catalog = state.catalog();
    let product = match form.source {
        CartSource::Catalog => catalog.product(form.id),
        CartSource::Parts => catalog.part(form.id),
    }
    .ok_or_else(|| AppError::NotFound(format!("товар {}", form.id)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(CartLine::snapshot(form.source, product));
    save_cart(&session, &cart).await?;

    let id = form.id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", id.as_str()), ("source", cart_source_value(form.source))]),
    );
    tracing::info!(product_id = %form.id, lines = cart.len(), "added to cart");

    Ok(Redirect::to(redirect_target(form.redirect.as_deref())))
}

/// Remove the line at the posted index.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    let line = cart
        .remove(form.index)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    save_cart(&session, &cart).await?;

    tracing::info!(product_id = %line.product_id, lines = cart.len(), "removed from cart");
    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    save_cart(&session, &Cart::new()).await?;
    Ok(Redirect::to("/cart"))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let count = match load_cart(&session).await {
        Ok(cart) => cart.len(),
        Err(e) => {
            tracing::warn!("Failed to read cart from session: {e}");
            0
        }
    };

    CartCountTemplate { count }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrina_core::Price;

    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_redirect_target_only_follows_local_paths() {
        assert_eq!(redirect_target(Some("/catalog?sort=new")), "/catalog?sort=new");
        assert_eq!(redirect_target(Some("//evil.example")), "/cart");
        assert_eq!(redirect_target(Some("/\\evil.example")), "/cart");
        assert_eq!(redirect_target(Some("/\\/evil.example")), "/cart");
        assert_eq!(redirect_target(Some("/\t/evil.example")), "/cart");
        assert_eq!(redirect_target(Some("https://evil.example")), "/cart");
        assert_eq!(redirect_target(None), "/cart");
    }

    #[test]
    fn test_cart_view_indexes_lines() {
        let catalog = Catalog::mock();
        let mut cart = Cart::new();
        cart.add(CartLine::snapshot(
            CartSource::Catalog,
            catalog.product(ProductId::new(4)).unwrap(),
        ));
        cart.add(CartLine::snapshot(
            CartSource::Parts,
            catalog.part(ProductId::new(1)).unwrap(),
        ));

        let view = CartView::try_from(&cart).unwrap();
        assert_eq!(view.item_count, 2);
        assert_eq!(view.items[1].index, 1);
        assert_eq!(view.items[0].url.as_deref(), Some("/catalog/product/4"));
        assert_eq!(view.items[1].url, None);
        assert_eq!(view.subtotal, Price::rub(69_990).to_string());
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::try_from(&Cart::new()).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.subtotal, Price::rub(0).to_string());
    }
}
