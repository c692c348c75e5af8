//! redb-based storage layer for the sale ledger
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `sales` | `u64` sequence | JSON `Sale` | Sale log (append-only) |
//! | `counters` | `&str` | `u64` | Sequence + daily receipt counter |
//!
//! Each append runs in a single write transaction: the sequence bump,
//! the receipt counter bump and the sale record commit together or not
//! at all. A power cut between checkouts can therefore never produce a
//! gap the engine has already acted on.

use std::path::Path;
use std::sync::Arc;

use chrono::Local;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::{Sale, SaleItem};
use thiserror::Error;

/// Table for storing sales: key = sequence, value = JSON-serialized Sale
const SALES_TABLE: TableDefinition<u64, &[u8]> = TableDefinition::new("sales");

/// Table for counters: key = "seq" or "sale_count", value = u64
const COUNTERS_TABLE: TableDefinition<&str, u64> = TableDefinition::new("counters");

const SEQUENCE_KEY: &str = "seq";
const SALE_COUNT_KEY: &str = "sale_count";

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Sale ledger backed by redb
#[derive(Clone)]
pub struct SaleLedger {
    db: Arc<Database>,
}

impl std::fmt::Debug for SaleLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaleLedger").finish()
    }
}

impl SaleLedger {
    /// Open (or create) the ledger database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;

        // Ensure tables exist so first reads don't fail
        let txn = db.begin_write()?;
        {
            txn.open_table(SALES_TABLE)?;
            txn.open_table(COUNTERS_TABLE)?;
        }
        txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Append a sale built from the given items.
    ///
    /// Assigns the receipt number and timestamp, commits atomically and
    /// returns the stored record. The total is derived from the items
    /// here so it can never disagree with them.
    pub fn append(&self, items: Vec<SaleItem>) -> StorageResult<Sale> {
        let total = items.iter().map(|i| i.subtotal()).sum();
        let created_at = chrono::Utc::now().timestamp_millis();

        let txn = self.db.begin_write()?;
        let sale = {
            let mut counters = txn.open_table(COUNTERS_TABLE)?;

            let seq = counters.get(SEQUENCE_KEY)?.map(|v| v.value()).unwrap_or(0) + 1;
            counters.insert(SEQUENCE_KEY, seq)?;

            let count = counters
                .get(SALE_COUNT_KEY)?
                .map(|v| v.value())
                .unwrap_or(0)
                + 1;
            counters.insert(SALE_COUNT_KEY, count)?;
            drop(counters);

            let sale = Sale {
                id: Self::receipt_number(count),
                items,
                total,
                created_at,
            };

            let mut sales = txn.open_table(SALES_TABLE)?;
            let bytes = serde_json::to_vec(&sale)?;
            sales.insert(seq, bytes.as_slice())?;
            sale
        };
        txn.commit()?;

        tracing::info!(sale_id = %sale.id, total = sale.total, "Sale appended to ledger");
        Ok(sale)
    }

    /// List all sales in append (creation) order
    pub fn list(&self) -> StorageResult<Vec<Sale>> {
        let txn = self.db.begin_read()?;
        let sales = txn.open_table(SALES_TABLE)?;

        let mut result = Vec::new();
        for entry in sales.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    /// Number of sales in the ledger
    pub fn len(&self) -> StorageResult<u64> {
        let txn = self.db.begin_read()?;
        let counters = txn.open_table(COUNTERS_TABLE)?;
        Ok(counters.get(SEQUENCE_KEY)?.map(|v| v.value()).unwrap_or(0))
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert pre-built sales if the ledger is empty (demo fixtures).
    /// Returns how many were inserted.
    pub fn seed_if_empty(&self, fixtures: Vec<Sale>) -> StorageResult<usize> {
        if !self.is_empty()? {
            return Ok(0);
        }

        let inserted = fixtures.len();
        let txn = self.db.begin_write()?;
        {
            let mut counters = txn.open_table(COUNTERS_TABLE)?;
            counters.insert(SEQUENCE_KEY, inserted as u64)?;
            counters.insert(SALE_COUNT_KEY, inserted as u64)?;
            drop(counters);

            let mut sales = txn.open_table(SALES_TABLE)?;
            for (i, sale) in fixtures.iter().enumerate() {
                let bytes = serde_json::to_vec(sale)?;
                sales.insert(i as u64 + 1, bytes.as_slice())?;
            }
        }
        txn.commit()?;

        tracing::info!(count = inserted, "Ledger seeded with fixture sales");
        Ok(inserted)
    }

    /// Receipt number: `S<yyyymmdd><10000 + count>`
    fn receipt_number(count: u64) -> String {
        let date_str = Local::now().format("%Y%m%d").to_string();
        format!("S{}{}", date_str, 10000 + count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, quantity: u32, price: i64) -> SaleItem {
        SaleItem {
            product_id: product_id.to_string(),
            quantity,
            price,
        }
    }

    fn temp_ledger() -> (tempfile::TempDir, SaleLedger) {
        let dir = tempfile::tempdir().unwrap();
        let ledger = SaleLedger::open(dir.path().join("ledger.redb")).unwrap();
        (dir, ledger)
    }

    #[test]
    fn test_append_assigns_total_and_receipt_number() {
        let (_dir, ledger) = temp_ledger();

        let sale = ledger
            .append(vec![item("p2", 3, 350), item("p5", 1, 325)])
            .unwrap();

        assert_eq!(sale.total, 3 * 350 + 325);
        assert!(sale.id.starts_with('S'));
        assert!(sale.created_at > 0);
    }

    #[test]
    fn test_list_preserves_append_order() {
        let (_dir, ledger) = temp_ledger();

        let first = ledger.append(vec![item("p1", 1, 250)]).unwrap();
        let second = ledger.append(vec![item("p2", 2, 350)]).unwrap();

        let sales = ledger.list().unwrap();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].id, first.id);
        assert_eq!(sales[1].id, second.id);
    }

    #[test]
    fn test_ledger_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.redb");

        let before = {
            let ledger = SaleLedger::open(&path).unwrap();
            ledger.append(vec![item("p1", 1, 250)]).unwrap()
        };

        let ledger = SaleLedger::open(&path).unwrap();
        let sales = ledger.list().unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].id, before.id);

        // Counter keeps increasing after reopen
        let next = ledger.append(vec![item("p2", 1, 350)]).unwrap();
        assert_ne!(next.id, before.id);
        assert_eq!(ledger.len().unwrap(), 2);
    }

    #[test]
    fn test_seed_if_empty_is_idempotent() {
        let (_dir, ledger) = temp_ledger();

        let fixture = Sale {
            id: "S2026080110001".to_string(),
            items: vec![item("p1", 1, 250)],
            total: 250,
            created_at: 1_754_000_000_000,
        };

        assert_eq!(ledger.seed_if_empty(vec![fixture.clone()]).unwrap(), 1);
        assert_eq!(ledger.seed_if_empty(vec![fixture]).unwrap(), 0);
        assert_eq!(ledger.list().unwrap().len(), 1);
    }
}
