//! Transaction model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Month, TransactionId};

/// Whether a transaction adds to or subtracts from the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// A single recorded money movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, assigned by the store at creation.
    pub id: TransactionId,
    /// Amount in currency units. Always positive; the sign in aggregate
    /// math comes from `kind`.
    pub amount: f64,
    /// Free-text description.
    pub description: String,
    /// Classification label.
    pub category: Category,
    /// Timestamp used both for ordering and for month bucketing.
    pub date: DateTime<Utc>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Returns the month bucket this transaction falls into.
    #[inline]
    #[must_use]
    pub fn month(&self) -> Month {
        Month::of(&self.date)
    }
}

/// Payload for creating a transaction: a [`Transaction`] without an id.
///
/// The store assigns the id on insertion; see
/// [`crate::tracker::MoneyTracker::add`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Amount in currency units (positive).
    pub amount: f64,
    /// Free-text description.
    pub description: String,
    /// Classification label.
    pub category: Category,
    /// Timestamp used for ordering and month bucketing.
    pub date: DateTime<Utc>,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewTransaction {
    /// Attaches an id, producing a full [`Transaction`].
    #[inline]
    #[must_use]
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_persisted_shape() {
        let json = r#"{
            "id": "tx-001",
            "amount": 49.99,
            "description": "Groceries",
            "category": "Food & Dining",
            "date": "2024-01-15T10:30:00Z",
            "type": "expense"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, TransactionId::new("tx-001".to_owned()));
        assert!((tx.amount - 49.99).abs() < f64::EPSILON);
        assert_eq!(tx.description, "Groceries");
        assert_eq!(tx.category, Category::FoodAndDining);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.month().to_string(), "2024-01");
    }

    #[test]
    fn serialize_roundtrip() {
        let tx = Transaction {
            id: TransactionId::new("t-1".to_owned()),
            amount: 2500.0,
            description: "Salary".to_owned(),
            category: Category::Income,
            date: DateTime::from_timestamp(1_705_312_800, 0).unwrap(),
            kind: TransactionType::Income,
        };
        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, tx);
    }

    #[test]
    fn kind_serializes_under_type_key() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, r#""income""#);
        let tx = Transaction {
            id: TransactionId::new("t-1".to_owned()),
            amount: 1.0,
            description: "x".to_owned(),
            category: Category::Other,
            date: DateTime::from_timestamp(1_705_312_800, 0).unwrap(),
            kind: TransactionType::Expense,
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value.get("type").and_then(serde_json::Value::as_str), Some("expense"));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn with_id_preserves_fields() {
        let draft = NewTransaction {
            amount: 850.0,
            description: "Rent".to_owned(),
            category: Category::Housing,
            date: DateTime::from_timestamp(1_705_312_800, 0).unwrap(),
            kind: TransactionType::Expense,
        };
        let tx = draft.clone().with_id(TransactionId::new("t-9".to_owned()));
        assert_eq!(tx.id.as_inner(), "t-9");
        assert!((tx.amount - draft.amount).abs() < f64::EPSILON);
        assert_eq!(tx.description, draft.description);
        assert_eq!(tx.category, draft.category);
        assert_eq!(tx.date, draft.date);
        assert_eq!(tx.kind, draft.kind);
    }
}
