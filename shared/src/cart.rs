//! Client-side cart state machine
//!
//! Purely local and synchronous: no operation here touches the catalog
//! or the network. The cart holds product snapshots, so the price a
//! customer saw when adding an item is the price submitted at checkout.
//!
//! Invariant: at most one line per product id. `total()` is always
//! recomputed from the lines, never cached.

use serde::{Deserialize, Serialize};

use crate::models::Product;

/// One cart line: a product snapshot plus a positive quantity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    /// Unit price in cents, snapshotted when the line was added
    pub price: i64,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal in cents
    pub fn subtotal(&self) -> i64 {
        self.price * self.quantity as i64
    }
}

/// In-memory cart for a single session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product. Increments the existing line if the
    /// product is already in the cart, otherwise inserts a new line
    /// with quantity 1.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            line.quantity += 1;
        } else {
            self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                price: product.price,
                quantity: 1,
            });
        }
    }

    /// Remove the line for a product entirely, whatever its quantity
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Overwrite a line's quantity. Zero removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove(product_id);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Cart total in cents, recomputed from the lines on every call
    pub fn total(&self) -> i64 {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
