//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use vitrina_core::TestimonialId;

use crate::filters;
use crate::models::{Category, Testimonial};
use crate::routes::catalog::ProductCardView;
use crate::state::AppState;

/// Stars shown per testimonial.
const MAX_STARS: u8 = 5;

// =============================================================================
// Static Content
// =============================================================================

/// A promotional banner linking into the catalog.
#[derive(Clone)]
pub struct Promotion {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
    pub link_text: &'static str,
    pub url: &'static str,
}

/// A store advantage shown at the bottom of the page.
#[derive(Clone)]
pub struct Advantage {
    pub icon: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

fn promotions() -> Vec<Promotion> {
    vec![
        Promotion {
            icon: "percent",
            title: "Скидка 15% на все аксессуары",
            text: "До конца месяца при заказе от 5\u{a0}000 ₽",
            link_text: "Подробнее",
            url: "/catalog?category=2",
        },
        Promotion {
            icon: "truck",
            title: "Бесплатная доставка",
            text: "При заказе от 10\u{a0}000 ₽ по всей России",
            link_text: "Подробнее",
            url: "/catalog",
        },
    ]
}

fn advantages() -> Vec<Advantage> {
    vec![
        Advantage {
            icon: "truck",
            title: "Быстрая доставка",
            text: "Доставляем по всей России",
        },
        Advantage {
            icon: "shield",
            title: "Гарантия качества",
            text: "Проверенные поставщики",
        },
        Advantage {
            icon: "clock",
            title: "Поддержка 24/7",
            text: "Всегда на связи",
        },
    ]
}

fn testimonials() -> Vec<Testimonial> {
    let testimonial = |id, name: &str, company: &str, text: &str, rating, initials: &str| {
        Testimonial {
            id: TestimonialId::new(id),
            name: name.to_string(),
            company: company.to_string(),
            text: text.to_string(),
            rating,
            image: format!("https://via.placeholder.com/100x100?text={initials}"),
        }
    };

    vec![
        testimonial(
            1,
            "Александр Петров",
            "ООО \"ТехноСервис\"",
            "Отличный магазин! Быстрая доставка и качественные товары. Рекомендую!",
            5,
            "AP",
        ),
        testimonial(
            2,
            "Иван Смирнов",
            "ИП Смирнов",
            "Очень доволен обслуживанием. Менеджеры всегда на связи и помогают с выбором.",
            5,
            "IS",
        ),
        testimonial(
            3,
            "Мария Иванова",
            "ООО \"ТехМаркет\"",
            "Широкий ассортимент и приятные цены. Заказываем регулярно.",
            4,
            "MI",
        ),
    ]
}

// =============================================================================
// Views
// =============================================================================

/// Category tile linking to the filtered catalog.
#[derive(Clone)]
pub struct CategoryTileView {
    pub url: String,
    pub name: String,
    pub description: String,
    pub image: String,
}

impl From<&Category> for CategoryTileView {
    fn from(category: &Category) -> Self {
        Self {
            url: format!("/catalog?category={}", category.id),
            name: category.name.clone(),
            description: category.description.clone(),
            image: category.image.clone(),
        }
    }
}

/// Testimonial card with its star row expanded.
#[derive(Clone)]
pub struct TestimonialView {
    pub name: String,
    pub company: String,
    pub text: String,
    pub image: String,
    /// CSS class per star, filled ones first.
    pub stars: Vec<&'static str>,
}

impl From<&Testimonial> for TestimonialView {
    fn from(t: &Testimonial) -> Self {
        Self {
            name: t.name.clone(),
            company: t.company.clone(),
            text: t.text.clone(),
            image: t.image.clone(),
            stars: (0..MAX_STARS)
                .map(|i| if i < t.rating { "star star-filled" } else { "star" })
                .collect(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub categories: Vec<CategoryTileView>,
    pub featured: Vec<ProductCardView>,
    pub promotions: Vec<Promotion>,
    pub testimonials: Vec<TestimonialView>,
    pub advantages: Vec<Advantage>,
    pub return_to: &'static str,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();

    HomeTemplate {
        categories: catalog.categories.iter().map(CategoryTileView::from).collect(),
        featured: catalog
            .featured_products()
            .into_iter()
            .map(ProductCardView::from_product)
            .collect(),
        promotions: promotions(),
        testimonials: testimonials().iter().map(TestimonialView::from).collect(),
        advantages: advantages(),
        return_to: "/",
    }
}
