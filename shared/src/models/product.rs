//! Product Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in cents
    pub price: i64,
    /// Authoritative sellable units
    pub stock: u32,
    /// Display-only warning boundary, no effect on checkout
    pub low_stock_threshold: u32,
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl Product {
    /// Whether the stock is at or below the warning threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductCreate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    pub stock: u32,
    pub low_stock_threshold: u32,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Update product payload (whole-record replace, id taken from the path)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(range(min = 0, message = "price cannot be negative"))]
    pub price: i64,
    pub stock: u32,
    pub low_stock_threshold: u32,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}
