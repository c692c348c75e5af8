//! Sale Ledger - append-only history of committed sales
//!
//! Sales enter the ledger exactly once, at checkout commit, and are
//! never mutated or deleted afterwards. Reporting reads the ledger as
//! its only source of truth.

mod storage;

pub use storage::{SaleLedger, StorageError, StorageResult};
