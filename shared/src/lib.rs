//! Shared types for the POS system
//!
//! Data models and client-side cart logic used by both the server and
//! its clients. This crate is free of I/O and async; everything here is
//! plain data plus pure functions over it.

pub mod cart;
pub mod models;

// Re-exports
pub use cart::{Cart, CartLine};
pub use models::{Product, ProductCreate, ProductUpdate, Role, Sale, SaleItem, User};
pub use serde::{Deserialize, Serialize};
