//! Data models for money tracker entities.
//!
//! This module contains the typed representations of transactions, the
//! closed category set, month buckets, and the derived monthly summary.

mod category;
mod ids;
mod month;
mod summary;
mod transaction;

pub use category::Category;
pub use ids::TransactionId;
pub use month::Month;
pub use summary::MonthlySummary;
pub use transaction::{NewTransaction, Transaction, TransactionType};
