//! Catalog Store - authoritative in-memory product inventory
//!
//! The catalog is the single source of truth for what is sellable and
//! how much of it exists. Reads are served straight from the map;
//! writes replace whole records so a failed edit never leaves a
//! half-applied product behind.
//!
//! Stock is mutated in exactly two places: inventory edits through
//! [`CatalogStore::update`], and committed checkouts through
//! [`CatalogStore::decrement_stock`] (called by the checkout engine
//! while it holds the per-product locks).

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use shared::models::{Product, ProductCreate, ProductUpdate};
use thiserror::Error;

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// In-memory product store shared across sessions
#[derive(Clone, Default)]
pub struct CatalogStore {
    products: Arc<RwLock<HashMap<String, Product>>>,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products_count", &self.products.read().len())
            .finish()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load products wholesale (startup fixtures, tests)
    pub fn seed(&self, products: Vec<Product>) {
        let mut map = self.products.write();
        map.clear();
        for product in products {
            map.insert(product.id.clone(), product);
        }
        tracing::info!(count = map.len(), "Catalog seeded");
    }

    /// List all products, sorted by name for a stable display order
    pub fn list(&self) -> Vec<Product> {
        let map = self.products.read();
        let mut products: Vec<_> = map.values().cloned().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Get a product by id
    pub fn get(&self, id: &str) -> Option<Product> {
        self.products.read().get(id).cloned()
    }

    /// Create a product with a fresh unique id
    pub fn create(&self, data: ProductCreate) -> Product {
        let product = Product {
            id: uuid::Uuid::new_v4().to_string(),
            name: data.name,
            price: data.price,
            stock: data.stock,
            low_stock_threshold: data.low_stock_threshold,
            category: data.category,
            image_urls: data.image_urls,
        };
        self.products
            .write()
            .insert(product.id.clone(), product.clone());
        product
    }

    /// Replace a product by id (whole record or nothing)
    pub fn update(&self, id: &str, data: ProductUpdate) -> CatalogResult<Product> {
        let mut map = self.products.write();
        if !map.contains_key(id) {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        let product = Product {
            id: id.to_string(),
            name: data.name,
            price: data.price,
            stock: data.stock,
            low_stock_threshold: data.low_stock_threshold,
            category: data.category,
            image_urls: data.image_urls,
        };
        map.insert(id.to_string(), product.clone());
        Ok(product)
    }

    /// Delete a product by id
    pub fn delete(&self, id: &str) -> CatalogResult<()> {
        match self.products.write().remove(id) {
            Some(_) => Ok(()),
            None => Err(CatalogError::NotFound(id.to_string())),
        }
    }

    /// Current stock for a product; `None` when the product is gone
    pub fn stock_of(&self, id: &str) -> Option<u32> {
        self.products.read().get(id).map(|p| p.stock)
    }

    /// Decrement a product's stock.
    ///
    /// Only the checkout engine calls this, after validating under the
    /// per-product locks; a failed debit here means the caller broke
    /// the validate-then-commit protocol.
    pub(crate) fn decrement_stock(&self, id: &str, quantity: u32) -> CatalogResult<()> {
        let mut map = self.products.write();
        let product = map
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        debug_assert!(product.stock >= quantity, "stock underflow for {}", id);
        product.stock = product.stock.saturating_sub(quantity);
        Ok(())
    }
}
