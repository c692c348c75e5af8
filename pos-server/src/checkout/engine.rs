//! CheckoutEngine - cart validation and sale commit
//!
//! # Transaction Flow
//!
//! ```text
//! checkout(lines)
//!     ├─ 1. Empty cart short-circuit (no sale, no error)
//!     ├─ 2. Acquire per-product locks, sorted id order
//!     ├─ 3. Validation pass: every line's stock must cover it
//!     ├─ 4. Append sale to ledger (fails -> nothing mutated)
//!     ├─ 5. Decrement stock for every line
//!     └─ 6. Release locks, return sale
//! ```
//!
//! The lock table serializes checkouts that touch overlapping product
//! ids; carts over disjoint products commit concurrently. Sorted
//! acquisition order makes overlap deadlock-free. The ledger append
//! happens *before* any stock decrement, so a storage failure surfaces
//! with the catalog untouched.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use shared::cart::CartLine;
use shared::models::{Sale, SaleItem};
use thiserror::Error;

use crate::catalog::CatalogStore;
use crate::ledger::{SaleLedger, StorageError};

/// Authoritative stock level for one product, reported with failures
#[derive(Debug, Clone, Serialize)]
pub struct StockLevel {
    pub product_id: String,
    pub stock: u32,
}

/// Why a checkout was rejected, with enough data for the client to
/// correct the cart without re-fetching the catalog
#[derive(Debug, Clone, Serialize)]
pub struct StockShortage {
    /// First product whose stock could not cover the request
    pub product_id: String,
    pub requested: u32,
    pub available: u32,
    /// Current stock of every product referenced by the cart
    pub current_stocks: Vec<StockLevel>,
}

/// Checkout errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Insufficient stock for product {}: requested {}, available {}",
        .0.product_id, .0.requested, .0.available)]
    InsufficientStock(StockShortage),

    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] StorageError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

/// The one component allowed to move stock and append sales
#[derive(Clone)]
pub struct CheckoutEngine {
    catalog: CatalogStore,
    ledger: SaleLedger,
    /// Per-product locks; entries are created on first touch and kept
    /// for the life of the process
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl std::fmt::Debug for CheckoutEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutEngine")
            .field("locked_products", &self.locks.len())
            .finish()
    }
}

impl CheckoutEngine {
    pub fn new(catalog: CatalogStore, ledger: SaleLedger) -> Self {
        Self {
            catalog,
            ledger,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Commit a cart as a sale, or fail without mutating anything.
    ///
    /// An empty cart is a no-op (`Ok(None)`), not an error. Quantities
    /// for the same product id are aggregated before validation, so a
    /// client that somehow splits a product across lines cannot sneak
    /// past the stock check.
    pub fn checkout(&self, lines: &[CartLine]) -> CheckoutResult<Option<Sale>> {
        if lines.is_empty() {
            return Ok(None);
        }

        for line in lines {
            if line.quantity == 0 {
                return Err(CheckoutError::InvalidQuantity(line.product_id.clone()));
            }
        }

        // Aggregate demand per product id, keeping first-seen order for
        // the shortage report.
        let mut product_ids: Vec<&str> = Vec::new();
        for line in lines {
            if !product_ids.contains(&line.product_id.as_str()) {
                product_ids.push(&line.product_id);
            }
        }
        let demand_for = |id: &str| -> u32 {
            lines
                .iter()
                .filter(|l| l.product_id == id)
                .map(|l| l.quantity)
                .sum()
        };

        // Lock acquisition in sorted id order; overlapping checkouts
        // serialize here, disjoint ones pass each other.
        let mut sorted_ids: Vec<&str> = product_ids.clone();
        sorted_ids.sort_unstable();
        let handles: Vec<Arc<Mutex<()>>> = sorted_ids
            .iter()
            .map(|id| {
                self.locks
                    .entry(id.to_string())
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .clone()
            })
            .collect();
        let _guards: Vec<_> = handles.iter().map(|m| m.lock()).collect();

        // Validation pass. A product deleted since the cart was built
        // counts as stock 0, not a crash.
        for id in &product_ids {
            let requested = demand_for(id);
            let available = self.catalog.stock_of(id).unwrap_or(0);
            if available < requested {
                let current_stocks = product_ids
                    .iter()
                    .map(|pid| StockLevel {
                        product_id: pid.to_string(),
                        stock: self.catalog.stock_of(pid).unwrap_or(0),
                    })
                    .collect();
                tracing::warn!(
                    product_id = %id,
                    requested,
                    available,
                    "Checkout rejected: insufficient stock"
                );
                return Err(CheckoutError::InsufficientStock(StockShortage {
                    product_id: id.to_string(),
                    requested,
                    available,
                    current_stocks,
                }));
            }
        }

        // Commit: ledger first. If the append fails the catalog has not
        // been touched and the caller sees a transient storage error.
        let items: Vec<SaleItem> = lines
            .iter()
            .map(|l| SaleItem {
                product_id: l.product_id.clone(),
                quantity: l.quantity,
                price: l.price,
            })
            .collect();
        let sale = self.ledger.append(items)?;

        // Stock decrement cannot fail now: every product was validated
        // under the locks we still hold.
        for id in &product_ids {
            if let Err(e) = self.catalog.decrement_stock(id, demand_for(id)) {
                tracing::error!(product_id = %id, error = %e, "Stock decrement failed after commit");
            }
        }

        tracing::info!(sale_id = %sale.id, lines = lines.len(), total = sale.total, "Checkout committed");
        Ok(Some(sale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Product, ProductUpdate};

    fn product(id: &str, price: i64, stock: u32) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price,
            stock,
            low_stock_threshold: 10,
            category: "Coffee".to_string(),
            image_urls: vec![],
        }
    }

    fn line(product_id: &str, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: format!("Product {}", product_id),
            price,
            quantity,
        }
    }

    fn engine_with(products: Vec<Product>) -> (tempfile::TempDir, CheckoutEngine) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = CatalogStore::new();
        catalog.seed(products);
        let ledger = SaleLedger::open(dir.path().join("ledger.redb")).unwrap();
        (dir, CheckoutEngine::new(catalog, ledger))
    }

    #[test]
    fn test_empty_cart_is_a_noop() {
        let (_dir, engine) = engine_with(vec![product("p1", 250, 10)]);

        let result = engine.checkout(&[]).unwrap();
        assert!(result.is_none());
        assert!(engine.ledger.list().unwrap().is_empty());
        assert_eq!(engine.catalog.stock_of("p1"), Some(10));
    }

    #[test]
    fn test_over_demand_rejected_without_mutation() {
        let (_dir, engine) = engine_with(vec![product("p2", 350, 8)]);

        let err = engine.checkout(&[line("p2", 350, 10)]).unwrap_err();
        match err {
            CheckoutError::InsufficientStock(shortage) => {
                assert_eq!(shortage.product_id, "p2");
                assert_eq!(shortage.requested, 10);
                assert_eq!(shortage.available, 8);
                assert_eq!(shortage.current_stocks.len(), 1);
                assert_eq!(shortage.current_stocks[0].stock, 8);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        assert_eq!(engine.catalog.stock_of("p2"), Some(8));
        assert!(engine.ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_success_decrements_and_appends() {
        let (_dir, engine) = engine_with(vec![product("p2", 350, 8)]);

        let sale = engine.checkout(&[line("p2", 350, 3)]).unwrap().unwrap();

        assert_eq!(engine.catalog.stock_of("p2"), Some(5));
        assert_eq!(sale.total, 3 * 350);
        assert_eq!(sale.items.len(), 1);
        assert_eq!(sale.items[0].quantity, 3);

        let sales = engine.ledger.list().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].id, sale.id);
    }

    #[test]
    fn test_partial_shortage_mutates_nothing() {
        let (_dir, engine) = engine_with(vec![
            product("p1", 250, 100),
            product("p2", 350, 2),
        ]);

        let err = engine
            .checkout(&[line("p1", 250, 5), line("p2", 350, 3)])
            .unwrap_err();
        assert!(matches!(err, CheckoutError::InsufficientStock(_)));

        // All-or-nothing: the satisfiable line must not have been applied.
        assert_eq!(engine.catalog.stock_of("p1"), Some(100));
        assert_eq!(engine.catalog.stock_of("p2"), Some(2));
        assert!(engine.ledger.list().unwrap().is_empty());
    }

    #[test]
    fn test_deleted_product_counts_as_zero_stock() {
        let (_dir, engine) = engine_with(vec![product("p3", 275, 40)]);
        engine.catalog.delete("p3").unwrap();

        let err = engine.checkout(&[line("p3", 275, 1)]).unwrap_err();
        match err {
            CheckoutError::InsufficientStock(shortage) => {
                assert_eq!(shortage.product_id, "p3");
                assert_eq!(shortage.available, 0);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sale_price_is_cart_price_not_catalog_price() {
        let (_dir, engine) = engine_with(vec![product("p1", 250, 10)]);

        // Price raised between cart-add and checkout: the cart snapshot wins.
        engine
            .catalog
            .update(
                "p1",
                ProductUpdate {
                    name: "Product p1".to_string(),
                    price: 999,
                    stock: 10,
                    low_stock_threshold: 10,
                    category: "Coffee".to_string(),
                    image_urls: vec![],
                },
            )
            .unwrap();

        let sale = engine.checkout(&[line("p1", 250, 2)]).unwrap().unwrap();
        assert_eq!(sale.items[0].price, 250);
        assert_eq!(sale.total, 500);
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        let (_dir, engine) = engine_with(vec![product("p1", 250, 10)]);

        let err = engine.checkout(&[line("p1", 250, 0)]).unwrap_err();
        assert!(matches!(err, CheckoutError::InvalidQuantity(_)));
        assert_eq!(engine.catalog.stock_of("p1"), Some(10));
    }

    #[test]
    fn test_split_lines_for_same_product_aggregate() {
        let (_dir, engine) = engine_with(vec![product("p1", 250, 5)]);

        // 3 + 3 across two lines exceeds stock 5 even though each line
        // alone would pass.
        let err = engine
            .checkout(&[line("p1", 250, 3), line("p1", 250, 3)])
            .unwrap_err();
        match err {
            CheckoutError::InsufficientStock(shortage) => {
                assert_eq!(shortage.requested, 6);
                assert_eq!(shortage.available, 5);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(engine.catalog.stock_of("p1"), Some(5));
    }
}
