//! Built-in demonstration data.

use chrono::NaiveDate;

use vitrina_core::{
    CategoryId, OrderNumber, OrderStatus, PaymentStatus, Price, ProductId, SpecValue,
    Specifications,
};

use super::Catalog;
use crate::models::{Category, Delivery, Order, OrderItem, PartCategory, Payment, Product};

fn placeholder(text: &str) -> String {
    format!("https://via.placeholder.com/400x300?text={text}")
}

fn specs<const N: usize>(entries: [(&str, SpecValue); N]) -> Specifications {
    entries.into_iter().collect()
}

/// A store product with the fields every mock entry shares.
fn product(id: u32, name: &str, category: &str, price: i64, image: &str, rating: f32, reviews: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        price: Price::rub(price),
        old_price: None,
        image: placeholder(image),
        description: None,
        specifications: Specifications::new(),
        manufacturer: None,
        in_stock: true,
        rating: Some(rating),
        reviews,
        discount: None,
        is_new: false,
    }
}

fn products() -> Vec<Product> {
    vec![
        Product {
            old_price: Some(Price::rub(99_990)),
            discount: Some(10),
            is_new: true,
            ..product(1, "iPhone 14 Pro", "Электроника", 89_990, "iPhone+14+Pro", 4.8, 12)
        },
        product(2, "MacBook Pro M2", "Компьютеры", 149_990, "MacBook+Pro", 4.9, 8),
        Product {
            old_price: Some(Price::rub(79_990)),
            discount: Some(15),
            ..product(3, "Samsung Galaxy S23", "Электроника", 69_990, "Samsung+S23", 4.5, 15)
        },
        Product {
            is_new: true,
            ..product(4, "AirPods Pro 2", "Аксессуары", 24_990, "AirPods+Pro", 4.7, 20)
        },
        Product {
            old_price: Some(Price::rub(89_990)),
            discount: Some(12),
            ..product(5, "Samsung 4K Smart TV", "Бытовая техника", 79_990, "Samsung+TV", 4.6, 10)
        },
        Product {
            is_new: true,
            ..product(6, "Gaming PC RTX 4080", "Компьютеры", 199_990, "Gaming+PC", 4.9, 5)
        },
    ]
}

fn categories() -> Vec<Category> {
    let category = |id: u32, name: &str, image: &str, description: &str| Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        image: placeholder(image),
        description: description.to_string(),
    };

    vec![
        category(1, "Электроника", "Электроника", "Смартфоны, ноутбуки, планшеты"),
        category(2, "Аксессуары", "Аксессуары", "Чехлы, наушники, зарядные устройства"),
        category(3, "Компьютеры", "Компьютеры", "Системные блоки, мониторы, комплектующие"),
        category(
            4,
            "Бытовая техника",
            "Бытовая+техника",
            "Холодильники, стиральные машины, телевизоры",
        ),
    ]
}

fn parts() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new(1),
            name: "Гидроцилиндр экскаватора".to_string(),
            category: "Гидравлика".to_string(),
            price: Price::rub(45_000),
            old_price: None,
            image: "/images/hydraulic-cylinder.jpg".to_string(),
            description: None,
            specifications: specs([
                ("diameter", "100 мм".into()),
                ("stroke", "500 мм".into()),
                ("pressure", "20 МПа".into()),
            ]),
            manufacturer: Some("Komatsu".to_string()),
            in_stock: true,
            rating: None,
            reviews: 0,
            discount: None,
            is_new: false,
        },
        Product {
            id: ProductId::new(2),
            name: "Гусеничная цепь".to_string(),
            category: "Ходовая часть".to_string(),
            price: Price::rub(120_000),
            old_price: None,
            image: "/images/track-chain.jpg".to_string(),
            description: None,
            specifications: specs([
                ("width", SpecValue::Integer(600)),
                ("pitch", "203 мм".into()),
                ("links", SpecValue::Integer(45)),
            ]),
            manufacturer: Some("Caterpillar".to_string()),
            in_stock: true,
            rating: None,
            reviews: 0,
            discount: None,
            is_new: false,
        },
    ]
}

fn part_categories() -> Vec<PartCategory> {
    vec![
        PartCategory {
            slug: "hydraulics".to_string(),
            name: "Гидравлика".to_string(),
        },
        PartCategory {
            slug: "undercarriage".to_string(),
            name: "Ходовая часть".to_string(),
        },
    ]
}

fn orders() -> Vec<Order> {
    vec![Order {
        id: OrderNumber::from("123456"),
        date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap_or_default(),
        status: OrderStatus::Delivered,
        items: vec![
            OrderItem {
                id: ProductId::new(1),
                name: "Гидроцилиндр экскаватора".to_string(),
                quantity: 1,
                price: Price::rub(45_000),
                image: "/images/hydraulic-cylinder.jpg".to_string(),
                specifications: specs([
                    ("diameter", "100мм".into()),
                    ("stroke", "500мм".into()),
                    ("pressure", "25МПа".into()),
                ]),
            },
            OrderItem {
                id: ProductId::new(2),
                name: "Гусеничная цепь бульдозера".to_string(),
                quantity: 2,
                price: Price::rub(120_000),
                image: "/images/track-chain.jpg".to_string(),
                specifications: specs([
                    ("width", "500мм".into()),
                    ("pitch", "203мм".into()),
                    ("plates", "41".into()),
                ]),
            },
        ],
        delivery: Delivery {
            method: "Стандартная доставка".to_string(),
            address: "ул. Примерная, д. 1".to_string(),
            city: "Москва".to_string(),
            postal_code: "123456".to_string(),
        },
        payment: Payment {
            method: "Банковской картой".to_string(),
            status: PaymentStatus::Completed,
        },
    }]
}

pub(super) fn catalog() -> Catalog {
    Catalog {
        products: products(),
        categories: categories(),
        parts: parts(),
        part_categories: part_categories(),
        orders: orders(),
        featured: vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)],
    }
}
