//! Pluggable storage backends for persisting the transaction collection.
//!
//! The store mirrors its whole collection into a single named slot after
//! every mutation; backends implement [`TransactionStorage`] to provide
//! that slot.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;
use crate::models::Transaction;

/// Fixed name of the key-value slot holding the transaction collection.
pub const STORAGE_KEY: &str = "money_tracker_transactions";

/// Durable slot for the transaction collection.
///
/// Semantics are whole-collection overwrite: [`save`](Self::save) replaces
/// whatever the slot held before; there is no merging and no incremental
/// patching. All methods take `&self` — implementations use interior
/// mutability for thread-safe access.
pub trait TransactionStorage: core::fmt::Debug + Send + Sync {
    /// Reads the persisted collection.
    ///
    /// Returns `Ok(None)` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to read or the stored data
    /// cannot be parsed.
    fn load(&self) -> Result<Option<Vec<Transaction>>>;

    /// Overwrites the slot with the given collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn save(&self, transactions: &[Transaction]) -> Result<()>;

    /// Removes the slot entirely; a subsequent [`load`](Self::load)
    /// returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to write.
    fn clear(&self) -> Result<()>;
}
