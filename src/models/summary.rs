//! Derived monthly summaries.

use serde::Serialize;

use super::{Month, Transaction, TransactionType};

/// Derived income/expense/balance totals for one month bucket.
///
/// Summaries are computed on demand from the transaction collection and
/// never stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    /// The month bucket.
    pub month: Month,
    /// Sum of income amounts in the month.
    pub income: f64,
    /// Sum of expense amounts in the month.
    pub expenses: f64,
    /// `income - expenses`.
    pub balance: f64,
    /// The month's transactions, in collection order.
    pub transactions: Vec<Transaction>,
}

impl MonthlySummary {
    /// Computes the summary for `month` over the given collection.
    ///
    /// Only transactions whose date falls in `month` are considered; an
    /// empty subset yields all-zero totals.
    #[must_use]
    pub fn compute(month: Month, transactions: &[Transaction]) -> Self {
        let scoped: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.month() == month)
            .cloned()
            .collect();
        let income = sum_amounts(&scoped, TransactionType::Income);
        let expenses = sum_amounts(&scoped, TransactionType::Expense);
        Self {
            month,
            income,
            expenses,
            balance: income - expenses,
            transactions: scoped,
        }
    }
}

/// Sums the amounts of transactions matching `kind`.
fn sum_amounts(transactions: &[Transaction], kind: TransactionType) -> f64 {
    transactions
        .iter()
        .filter(|tx| tx.kind == kind)
        .map(|tx| tx.amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionId};
    use chrono::DateTime;

    /// Builds a transaction at an offset (in seconds) from a fixed base
    /// timestamp of 2024-01-15T10:00:00Z.
    fn tx(id: &str, amount: f64, kind: TransactionType, offset_secs: i64) -> Transaction {
        Transaction {
            id: TransactionId::new(id.to_owned()),
            amount,
            description: format!("Transaction {id}"),
            category: Category::Other,
            date: DateTime::from_timestamp(1_705_312_800 + offset_secs, 0).unwrap(),
            kind,
        }
    }

    /// Roughly one month in seconds, enough to land in February.
    const ONE_MONTH: i64 = 31 * 24 * 3600;

    #[test]
    fn compute_splits_income_and_expenses() {
        let transactions = vec![
            tx("t-1", 2500.0, TransactionType::Income, 0),
            tx("t-2", 850.0, TransactionType::Expense, 60),
            tx("t-3", 150.0, TransactionType::Expense, 120),
        ];
        let summary = MonthlySummary::compute(Month::new(2024, 1).unwrap(), &transactions);
        assert!((summary.income - 2500.0).abs() < f64::EPSILON);
        assert!((summary.expenses - 1000.0).abs() < f64::EPSILON);
        assert!((summary.balance - 1500.0).abs() < f64::EPSILON);
        assert_eq!(summary.transactions.len(), 3);
    }

    #[test]
    fn compute_only_aggregates_the_requested_month() {
        let transactions = vec![
            tx("t-jan", 100.0, TransactionType::Expense, 0),
            tx("t-feb", 200.0, TransactionType::Expense, ONE_MONTH),
        ];
        let summary = MonthlySummary::compute(Month::new(2024, 1).unwrap(), &transactions);
        assert_eq!(summary.transactions.len(), 1);
        assert!((summary.expenses - 100.0).abs() < f64::EPSILON);
        assert!((summary.income).abs() < f64::EPSILON);
    }

    #[test]
    fn compute_on_empty_month_is_all_zero() {
        let summary = MonthlySummary::compute(Month::new(2030, 6).unwrap(), &[]);
        assert!(summary.income.abs() < f64::EPSILON);
        assert!(summary.expenses.abs() < f64::EPSILON);
        assert!(summary.balance.abs() < f64::EPSILON);
        assert!(summary.transactions.is_empty());
    }

    #[test]
    fn balance_equals_income_minus_expenses() {
        let transactions = vec![
            tx("t-1", 10.5, TransactionType::Income, 0),
            tx("t-2", 3.25, TransactionType::Expense, 1),
            tx("t-3", 7.75, TransactionType::Income, 2),
        ];
        let summary = MonthlySummary::compute(Month::new(2024, 1).unwrap(), &transactions);
        assert!((summary.balance - (summary.income - summary.expenses)).abs() < f64::EPSILON);
    }
}
