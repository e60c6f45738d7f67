//! Page rendering tests for the storefront router.

use axum::http::StatusCode;
use vitrina_integration_tests::TestContext;

/// Position of `needle` in `haystack`, failing the test when absent.
fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in page"))
}

// ============================================================================
// Home & Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    let mut ctx = TestContext::new();

    let resp = ctx.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = ctx.get("/health/ready").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_fails_for_empty_catalog() {
    let empty = vitrina_storefront::catalog::Catalog::from_json_str(r#"{"products": [], "categories": []}"#)
        .unwrap();
    let mut ctx = TestContext::with_catalog(empty);

    assert_eq!(ctx.get("/health/ready").await.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_home_page_sections() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("lang=\"ru\""));
    assert!(resp.body.contains("Магазин электроники и техники"));
    assert!(resp.body.contains("href=\"/catalog?category=1\""));
    assert!(resp.body.contains("href=\"/catalog/product/1\""));
    assert!(resp.body.contains("MacBook Pro M2"));
    assert!(resp.body.contains("Скидка 15% на все аксессуары"));
    assert!(resp.body.contains("Александр Петров"));
    assert!(resp.body.contains("Поддержка 24/7"));
    // Only featured products are on the homepage
    assert!(!resp.body.contains("Gaming PC RTX 4080"));
}

#[tokio::test]
async fn test_responses_carry_security_and_request_id_headers() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/").await;

    assert_eq!(resp.headers.get("x-frame-options").unwrap(), "DENY");
    assert!(resp.headers.get("content-security-policy").is_some());
    assert!(resp.headers.get("x-request-id").is_some());
}

#[tokio::test]
async fn test_static_stylesheet_is_served() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/static/css/main.css").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(".bg-green-100"));
    assert!(resp.headers.get("cache-control").is_none());
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_lists_everything_by_default() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Найдено товаров: 6"));
    assert!(resp.body.contains("89\u{a0}990 ₽"));
}

#[tokio::test]
async fn test_catalog_price_desc_order() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog?sort=price-desc").await;

    let pc = position(&resp.body, "Gaming PC RTX 4080");
    let macbook = position(&resp.body, "MacBook Pro M2");
    let airpods = position(&resp.body, "AirPods Pro 2");
    assert!(pc < macbook && macbook < airpods);
    assert!(resp.body.contains("value=\"price-desc\" selected"));
}

#[tokio::test]
async fn test_catalog_category_and_price_filter() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog?category=1&min=0&max=80000").await;

    assert!(resp.body.contains("Найдено товаров: 1"));
    assert!(resp.body.contains("Samsung Galaxy S23"));
    assert!(!resp.body.contains("iPhone 14 Pro</a>"));
}

#[tokio::test]
async fn test_catalog_inverted_range_is_empty() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog?min=100000&max=10").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Найдено товаров: 0"));
}

#[tokio::test]
async fn test_catalog_malformed_params_fall_back_to_defaults() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog?category=abc&min=cheap&sort=random").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Найдено товаров: 6"));
}

#[tokio::test]
async fn test_product_page() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog/product/3").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Samsung Galaxy S23"));
    assert!(resp.body.contains("-15%"));
    // Related product from the same category
    assert!(resp.body.contains("iPhone 14 Pro"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();

    assert_eq!(ctx.get("/catalog/product/999").await.status, StatusCode::NOT_FOUND);
    assert_eq!(ctx.get("/catalog/product/iphone").await.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Parts & Search
// ============================================================================

#[tokio::test]
async fn test_parts_category_page() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog/category/hydraulics").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Категория: Гидравлика"));
    assert!(resp.body.contains("Гидроцилиндр экскаватора"));
    assert!(resp.body.contains("Komatsu"));
    assert!(resp.body.contains("name=\"source\" value=\"parts\""));
    assert!(!resp.body.contains("Гусеничная цепь"));
}

#[tokio::test]
async fn test_parts_category_price_filter() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog/category/undercarriage?max=100000").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Запчасти не найдены."));
}

#[tokio::test]
async fn test_parts_category_returns_to_filtered_view() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog/category/hydraulics?sort=price-desc").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(
        resp.body
            .contains("name=\"redirect\" value=\"/catalog/category/hydraulics?sort=price-desc\"")
    );
}

#[tokio::test]
async fn test_unknown_parts_category_is_not_found() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/catalog/category/engines").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("Страница не найдена"));
}

#[tokio::test]
async fn test_search_hint_for_empty_query() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/search?q=").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Начните вводить название товара..."));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/search?q=SAMSUNG").await;

    assert!(resp.body.contains("Найдено товаров: 2"));
    assert!(resp.body.contains("Samsung Galaxy S23"));
    assert!(resp.body.contains("Samsung 4K Smart TV"));
    assert!(resp.body.contains("href=\"/catalog?q=SAMSUNG\""));
}

// ============================================================================
// Orders
// ============================================================================

#[tokio::test]
async fn test_order_list() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/profile/orders").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("href=\"/profile/orders/123456\""));
    assert!(resp.body.contains("15.03.2024"));
}

#[tokio::test]
async fn test_order_detail() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/profile/orders/123456").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Заказ #123456"));
    assert!(resp.body.contains("Доставлен"));
    assert!(resp.body.contains("bg-green-100 text-green-800"));
    assert!(resp.body.contains("Оплачено"));
    assert!(resp.body.contains("Стандартная доставка"));
    assert!(resp.body.contains("285\u{a0}000 ₽"));
    assert!(resp.body.contains("href=\"/profile/orders\""));
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.get("/profile/orders/1").await.status, StatusCode::NOT_FOUND);
}
