//! Sales reporting
//!
//! Pure aggregation over the ledger plus a catalog snapshot. Nothing
//! here mutates state; every number is recomputed from the sales on
//! each call. Products deleted since a sale was made aggregate under
//! an "Unknown" label instead of failing.

use std::collections::HashMap;

use serde::Serialize;
use shared::models::{Product, Sale};

/// Per-product sales row
#[derive(Debug, Clone, Serialize)]
pub struct ProductSalesRow {
    pub product_id: String,
    pub name: String,
    pub units: u64,
    /// Revenue in cents
    pub revenue: i64,
}

/// Full report response
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// Total revenue in cents across all sales
    pub total_revenue: i64,
    pub sale_count: usize,
    /// Per-product units and revenue, highest revenue first
    pub product_sales: Vec<ProductSalesRow>,
    /// Highest-revenue product, if any sales exist
    pub top_seller: Option<ProductSalesRow>,
}

/// Aggregate the ledger against the current catalog snapshot
pub fn summarize(sales: &[Sale], products: &[Product]) -> ReportSummary {
    let names: HashMap<&str, &str> = products
        .iter()
        .map(|p| (p.id.as_str(), p.name.as_str()))
        .collect();

    let mut per_product: HashMap<&str, (u64, i64)> = HashMap::new();
    let mut total_revenue = 0i64;

    for sale in sales {
        total_revenue += sale.total;
        for item in &sale.items {
            let entry = per_product.entry(item.product_id.as_str()).or_default();
            entry.0 += item.quantity as u64;
            entry.1 += item.subtotal();
        }
    }

    let mut product_sales: Vec<ProductSalesRow> = per_product
        .into_iter()
        .map(|(product_id, (units, revenue))| ProductSalesRow {
            product_id: product_id.to_string(),
            name: names.get(product_id).unwrap_or(&"Unknown").to_string(),
            units,
            revenue,
        })
        .collect();
    product_sales.sort_by(|a, b| b.revenue.cmp(&a.revenue).then(a.name.cmp(&b.name)));

    let top_seller = product_sales.first().cloned();

    ReportSummary {
        total_revenue,
        sale_count: sales.len(),
        product_sales,
        top_seller,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SaleItem;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            price: 250,
            stock: 10,
            low_stock_threshold: 5,
            category: "Coffee".to_string(),
            image_urls: vec![],
        }
    }

    fn sale(id: &str, items: Vec<SaleItem>) -> Sale {
        let total = items.iter().map(|i| i.subtotal()).sum();
        Sale {
            id: id.to_string(),
            items,
            total,
            created_at: 1_754_000_000_000,
        }
    }

    fn item(product_id: &str, quantity: u32, price: i64) -> SaleItem {
        SaleItem {
            product_id: product_id.to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_empty_ledger_summary() {
        let summary = summarize(&[], &[product("p1", "Espresso")]);

        assert_eq!(summary.total_revenue, 0);
        assert_eq!(summary.sale_count, 0);
        assert!(summary.product_sales.is_empty());
        assert!(summary.top_seller.is_none());
    }

    #[test]
    fn test_revenue_matches_ledger_totals_exactly() {
        let sales = vec![
            sale("s1", vec![item("p1", 1, 250), item("p3", 1, 275)]),
            sale("s2", vec![item("p2", 2, 350)]),
        ];
        let products = vec![
            product("p1", "Espresso"),
            product("p2", "Latte"),
            product("p3", "Croissant"),
        ];

        let summary = summarize(&sales, &products);
        let ledger_total: i64 = sales.iter().map(|s| s.total).sum();

        assert_eq!(summary.total_revenue, ledger_total);
        assert_eq!(summary.sale_count, 2);
    }

    #[test]
    fn test_top_seller_by_revenue_not_units() {
        let sales = vec![
            // p1: 10 units x 100 = 1000; p2: 2 units x 750 = 1500
            sale("s1", vec![item("p1", 10, 100)]),
            sale("s2", vec![item("p2", 2, 750)]),
        ];
        let products = vec![product("p1", "Tea"), product("p2", "Sandwich")];

        let summary = summarize(&sales, &products);
        let top = summary.top_seller.unwrap();

        assert_eq!(top.product_id, "p2");
        assert_eq!(top.revenue, 1500);
        assert_eq!(summary.product_sales[1].units, 10);
    }

    #[test]
    fn test_deleted_product_reports_as_unknown() {
        let sales = vec![sale("s1", vec![item("gone", 3, 300)])];

        let summary = summarize(&sales, &[]);

        assert_eq!(summary.product_sales.len(), 1);
        assert_eq!(summary.product_sales[0].name, "Unknown");
        assert_eq!(summary.product_sales[0].revenue, 900);
        assert_eq!(summary.total_revenue, 900);
    }

    #[test]
    fn test_sale_prices_independent_of_catalog_prices() {
        // The catalog price differs from the recorded sale price; the
        // report must use the sale's captured price.
        let sales = vec![sale("s1", vec![item("p1", 2, 250)])];
        let mut current = product("p1", "Espresso");
        current.price = 999;

        let summary = summarize(&sales, &[current]);
        assert_eq!(summary.total_revenue, 500);
        assert_eq!(summary.product_sales[0].revenue, 500);
    }
}
