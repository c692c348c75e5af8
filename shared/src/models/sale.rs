//! Sale Model

use serde::{Deserialize, Serialize};

/// One line of a committed sale
///
/// `price` is the unit price at the time of sale; later product edits
/// never change it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub product_id: String,
    pub quantity: u32,
    /// Unit price in cents, captured at checkout time
    pub price: i64,
}

impl SaleItem {
    /// Line subtotal in cents
    pub fn subtotal(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// A committed sale. Immutable once appended to the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    /// Receipt number, e.g. `S2026080710001`
    pub id: String,
    pub items: Vec<SaleItem>,
    /// Total in cents; always equals the sum of item subtotals
    pub total: i64,
    /// Unix timestamp in milliseconds
    pub created_at: i64,
}
