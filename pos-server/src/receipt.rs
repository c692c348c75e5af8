//! Receipt rendering
//!
//! Read-only consumer of a committed sale: renders it as fixed-width
//! plain text for printing or display. Nothing here feeds back into
//! the transaction core.

use chrono::{Local, TimeZone};
use shared::models::{Product, Sale};

const RECEIPT_WIDTH: usize = 38;

/// Format cents as a dollar amount, e.g. 350 -> "$3.50"
pub fn fmt_money(cents: i64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// Render a sale as a plain-text receipt.
///
/// Item names are resolved against the current catalog; items whose
/// product has since been deleted fall back to the product id so old
/// receipts always render.
pub fn render(sale: &Sale, products: &[Product], store_name: &str) -> String {
    let mut out = String::new();
    let line = "-".repeat(RECEIPT_WIDTH);

    out.push_str(&format!("{:^width$}\n", store_name, width = RECEIPT_WIDTH));
    out.push_str(&format!("{:^width$}\n", "RECEIPT", width = RECEIPT_WIDTH));
    out.push_str(&line);
    out.push('\n');

    let date = Local
        .timestamp_millis_opt(sale.created_at)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    out.push_str(&format!("Date: {}\n", date));
    out.push_str(&format!("Receipt: {}\n", sale.id));
    out.push_str(&line);
    out.push('\n');

    for item in &sale.items {
        let name = products
            .iter()
            .find(|p| p.id == item.product_id)
            .map(|p| p.name.as_str())
            .unwrap_or(item.product_id.as_str());
        let label = format!("{} x {}", item.quantity, name);
        let amount = fmt_money(item.subtotal());
        out.push_str(&format!(
            "{:<left$}{:>right$}\n",
            label,
            amount,
            left = RECEIPT_WIDTH - 10,
            right = 10
        ));
    }

    out.push_str(&line);
    out.push('\n');
    out.push_str(&format!(
        "{:<left$}{:>right$}\n",
        "Total",
        fmt_money(sale.total),
        left = RECEIPT_WIDTH - 10,
        right = 10
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SaleItem;

    #[test]
    fn test_fmt_money() {
        assert_eq!(fmt_money(0), "$0.00");
        assert_eq!(fmt_money(5), "$0.05");
        assert_eq!(fmt_money(350), "$3.50");
        assert_eq!(fmt_money(107500), "$1075.00");
    }

    #[test]
    fn test_render_resolves_names_and_totals() {
        let sale = Sale {
            id: "S2026080710001".to_string(),
            items: vec![
                SaleItem {
                    product_id: "p1".to_string(),
                    quantity: 2,
                    price: 250,
                },
                SaleItem {
                    product_id: "gone".to_string(),
                    quantity: 1,
                    price: 325,
                },
            ],
            total: 825,
            created_at: 1_754_000_000_000,
        };
        let products = vec![Product {
            id: "p1".to_string(),
            name: "Espresso".to_string(),
            price: 250,
            stock: 10,
            low_stock_threshold: 5,
            category: "Coffee".to_string(),
            image_urls: vec![],
        }];

        let text = render(&sale, &products, "SAIF Cafe");

        assert!(text.contains("SAIF Cafe"));
        assert!(text.contains("S2026080710001"));
        assert!(text.contains("2 x Espresso"));
        // Deleted product renders by id, not by crashing
        assert!(text.contains("1 x gone"));
        assert!(text.contains("$8.25"));
    }
}
