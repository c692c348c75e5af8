//! Checkout Transaction Engine
//!
//! Turns a submitted cart into a committed sale, or rejects it leaving
//! no trace. See [`engine::CheckoutEngine`] for the transaction
//! protocol.

mod engine;

pub use engine::{CheckoutEngine, CheckoutError, CheckoutResult, StockLevel, StockShortage};
