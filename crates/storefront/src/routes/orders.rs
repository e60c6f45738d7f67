//! Order history route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use chrono::NaiveDate;
use tracing::instrument;

use vitrina_core::PriceError;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::{Order, OrderItem};
use crate::routes::catalog::{SpecRowView, spec_rows};
use crate::state::AppState;

/// Order dates render as `dd.mm.yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Status badge data shared by the list and detail pages.
#[derive(Clone)]
pub struct StatusView {
    pub icon: &'static str,
    pub label: &'static str,
    pub class: &'static str,
}

impl From<&Order> for StatusView {
    fn from(order: &Order) -> Self {
        Self {
            icon: order.status.icon(),
            label: order.status.label(),
            class: order.status.badge_class(),
        }
    }
}

/// Row in the order list.
#[derive(Clone)]
pub struct OrderSummaryView {
    pub id: String,
    pub url: String,
    pub date: String,
    pub status: StatusView,
    pub unit_count: u32,
    pub total: String,
}

impl OrderSummaryView {
    fn try_from_order(order: &Order) -> std::result::Result<Self, PriceError> {
        Ok(Self {
            id: order.id.to_string(),
            url: format!("/profile/orders/{}", order.id),
            date: format_date(order.date),
            status: StatusView::from(order),
            unit_count: order.unit_count(),
            total: order.total()?.to_string(),
        })
    }
}

/// Line of an order detail page.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
    pub specifications: Vec<SpecRowView>,
}

impl OrderItemView {
    fn try_from_item(item: &OrderItem) -> std::result::Result<Self, PriceError> {
        Ok(Self {
            name: item.name.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.to_string(),
            line_total: item.line_total()?.to_string(),
            specifications: spec_rows(&item.specifications),
        })
    }
}

/// Order list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub orders: Vec<OrderSummaryView>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderShowTemplate {
    pub id: String,
    pub date: String,
    pub status: StatusView,
    pub items: Vec<OrderItemView>,
    pub delivery_method: String,
    pub delivery_address: String,
    pub delivery_city: String,
    pub delivery_postal_code: String,
    pub payment_method: String,
    pub payment_label: &'static str,
    pub payment_class: &'static str,
    pub total: String,
}

fn price_error(order: &Order, err: &PriceError) -> AppError {
    AppError::Internal(format!("order {} total: {err}", order.id))
}

/// Display the order list.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<OrdersIndexTemplate> {
    let orders = state
        .catalog()
        .orders
        .iter()
        .map(|order| OrderSummaryView::try_from_order(order).map_err(|e| price_error(order, &e)))
        .collect::<Result<Vec<_>>>()?;

    Ok(OrdersIndexTemplate { orders })
}

/// Display one order.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<OrderShowTemplate> {
    let order = state
        .catalog()
        .order(&id)
        .ok_or_else(|| AppError::NotFound(format!("заказ {id}")))?;

    let items = order
        .items
        .iter()
        .map(OrderItemView::try_from_item)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| price_error(order, &e))?;
    let total = order.total().map_err(|e| price_error(order, &e))?;

    Ok(OrderShowTemplate {
        id: order.id.to_string(),
        date: format_date(order.date),
        status: StatusView::from(order),
        items,
        delivery_method: order.delivery.method.clone(),
        delivery_address: order.delivery.address.clone(),
        delivery_city: order.delivery.city.clone(),
        delivery_postal_code: order.delivery.postal_code.clone(),
        payment_method: order.payment.method.clone(),
        payment_label: order.payment.status.label(),
        payment_class: order.payment.status.text_class(),
        total: total.to_string(),
    })
}
