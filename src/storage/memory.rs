//! In-memory storage backend for testing.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation
//! of [`super::TransactionStorage`]. Ideal for unit tests and ephemeral
//! embedders where file I/O is undesirable.

use std::sync::Mutex;

use crate::error::{Result, TrackerError};
use crate::models::Transaction;

/// Thread-safe in-memory storage.
///
/// Distinguishes a slot that has never been written ([`load`] returns
/// `Ok(None)`) from one holding an empty collection.
///
/// [`load`]: super::TransactionStorage::load
///
/// # Example
///
/// ```rust
/// use moneytracker_rs::storage::InMemoryStorage;
///
/// let storage = InMemoryStorage::new();
/// // Use with the tracker builder:
/// // MoneyTracker::builder().storage(storage).build()
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// Slot contents behind a mutex; `None` until the first save.
    slot: Mutex<Option<Vec<Transaction>>>,
}

impl InMemoryStorage {
    /// Creates a new storage with an unwritten slot.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage whose slot already holds the given collection.
    #[inline]
    #[must_use]
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            slot: Mutex::new(Some(transactions)),
        }
    }

    /// Acquires the slot lock and applies a closure.
    fn with_lock<R>(&self, f: impl FnOnce(&mut Option<Vec<Transaction>>) -> R) -> Result<R> {
        let mut slot = self.slot.lock().map_err(|err| lock_error(&err))?;
        Ok(f(&mut slot))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> TrackerError {
    TrackerError::Storage(err.to_string().into())
}

impl super::TransactionStorage for InMemoryStorage {
    #[inline]
    fn load(&self) -> Result<Option<Vec<Transaction>>> {
        self.with_lock(|slot| slot.clone())
    }

    #[inline]
    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        self.with_lock(|slot| *slot = Some(transactions.to_vec()))
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(|slot| *slot = None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionId, TransactionType};
    use crate::storage::TransactionStorage;
    use chrono::DateTime;

    /// Creates a minimal test transaction.
    fn test_transaction(id: &str, amount: f64) -> Transaction {
        Transaction {
            id: TransactionId::new(id.to_owned()),
            amount,
            description: format!("Transaction {id}"),
            category: Category::Other,
            date: DateTime::from_timestamp(1_705_312_800, 0).unwrap(),
            kind: TransactionType::Expense,
        }
    }

    #[test]
    fn unwritten_slot_loads_none() {
        let storage = InMemoryStorage::new();
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn saved_empty_collection_is_not_none() {
        let storage = InMemoryStorage::new();
        storage.save(&[]).unwrap();
        assert_eq!(storage.load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let storage = InMemoryStorage::new();
        let transactions = vec![test_transaction("t-1", 10.0), test_transaction("t-2", 20.0)];
        storage.save(&transactions).unwrap();
        assert_eq!(storage.load().unwrap(), Some(transactions));
    }

    #[test]
    fn save_overwrites_rather_than_merges() {
        let storage = InMemoryStorage::new();
        storage
            .save(&[test_transaction("t-1", 10.0), test_transaction("t-2", 20.0)])
            .unwrap();
        storage.save(&[test_transaction("t-3", 30.0)]).unwrap();
        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.first().map(|tx| tx.id.as_inner()), Some("t-3"));
    }

    #[test]
    fn with_transactions_preloads_the_slot() {
        let storage = InMemoryStorage::with_transactions(vec![test_transaction("t-1", 5.0)]);
        assert_eq!(storage.load().unwrap().map(|txs| txs.len()), Some(1));
    }

    #[test]
    fn clear_resets_to_unwritten() {
        let storage = InMemoryStorage::new();
        storage.save(&[test_transaction("t-1", 10.0)]).unwrap();
        storage.clear().unwrap();
        assert!(storage.load().unwrap().is_none());
    }
}
