//! Demo fixtures
//!
//! Startup data for development and demos: a small cafe menu and a few
//! historical sales. Fixture product ids are stable (`p1`..`p6`) so the
//! sales history stays consistent across restarts.

use shared::models::{Product, Sale, SaleItem};

fn product(
    id: &str,
    name: &str,
    price: i64,
    stock: u32,
    threshold: u32,
    category: &str,
    images: &[&str],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        stock,
        low_stock_threshold: threshold,
        category: category.to_string(),
        image_urls: images.iter().map(|s| s.to_string()).collect(),
    }
}

/// The demo menu
pub fn demo_products() -> Vec<Product> {
    vec![
        product(
            "p1",
            "Espresso",
            250,
            100,
            10,
            "Coffee",
            &["https://picsum.photos/seed/espresso/400"],
        ),
        product(
            "p2",
            "Latte",
            350,
            8,
            10,
            "Coffee",
            &["https://picsum.photos/seed/latte/400"],
        ),
        product(
            "p3",
            "Croissant",
            275,
            40,
            5,
            "Pastry",
            &["https://picsum.photos/seed/croissant/400"],
        ),
        product(
            "p4",
            "Muffin",
            300,
            35,
            5,
            "Pastry",
            &["https://picsum.photos/seed/muffin/400"],
        ),
        product(
            "p5",
            "Iced Tea",
            325,
            50,
            15,
            "Drinks",
            &["https://picsum.photos/seed/tea/400"],
        ),
        product(
            "p6",
            "Sandwich",
            750,
            20,
            5,
            "Food",
            &["https://picsum.photos/seed/sandwich/400"],
        ),
    ]
}

fn item(product_id: &str, quantity: u32, price: i64) -> SaleItem {
    SaleItem {
        product_id: product_id.to_string(),
        quantity,
        price,
    }
}

/// A few days of sales history for the reports page
pub fn demo_sales() -> Vec<Sale> {
    const DAY_MS: i64 = 86_400_000;
    let now = chrono::Utc::now().timestamp_millis();

    let fixtures = vec![
        (
            "S2026080210001",
            now - 5 * DAY_MS,
            vec![item("p1", 1, 250), item("p3", 1, 275)],
        ),
        ("S2026080410002", now - 3 * DAY_MS, vec![item("p2", 2, 350)]),
        (
            "S2026080610003",
            now - DAY_MS,
            vec![item("p6", 1, 750), item("p5", 1, 325)],
        ),
    ];

    fixtures
        .into_iter()
        .map(|(id, created_at, items)| {
            let total = items.iter().map(|i| i.subtotal()).sum();
            Sale {
                id: id.to_string(),
                items,
                total,
                created_at,
            }
        })
        .collect()
}
