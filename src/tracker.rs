//! The transaction store.
//!
//! [`MoneyTracker`] owns the transaction collection and the selected-month
//! scope, exposes mutation operations and derived reads, and writes the
//! whole collection back to its [`TransactionStorage`] slot after every
//! mutation. It is constructed explicitly via a builder and handed to
//! whichever consumers need it — there is no ambient global state.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Result, TrackerError};
use crate::models::{
    Category, Month, MonthlySummary, NewTransaction, Transaction, TransactionId, TransactionType,
};
use crate::storage::TransactionStorage;

/// Default number of items returned by recent-transaction queries.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Error-state message reported after a failed hydration.
const LOAD_ERROR_MESSAGE: &str = "failed to load transactions";

/// Composable filter for querying transactions.
///
/// Use builder-style methods to chain multiple criteria. All conditions
/// are combined — a transaction must satisfy every set criterion to pass.
///
/// # Examples
///
/// ```
/// use moneytracker_rs::models::{Category, TransactionType};
/// use moneytracker_rs::tracker::TransactionFilter;
///
/// let filter = TransactionFilter::new()
///     .category(Category::Housing)
///     .kind(TransactionType::Expense)
///     .search("rent");
/// ```
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionFilter {
    /// Month bucket the transaction must fall into.
    pub month: Option<Month>,
    /// Required category.
    pub category: Option<Category>,
    /// Required transaction type.
    pub kind: Option<TransactionType>,
    /// Case-insensitive substring matched against the description or the
    /// category label.
    pub search: Option<String>,
    /// Minimum amount (inclusive).
    pub min_amount: Option<f64>,
    /// Maximum amount (inclusive).
    pub max_amount: Option<f64>,
}

impl TransactionFilter {
    /// Creates an empty filter that matches all transactions.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to transactions falling in the given month.
    #[inline]
    #[must_use]
    pub const fn month(mut self, month: Month) -> Self {
        self.month = Some(month);
        self
    }

    /// Restricts to transactions with the given category.
    #[inline]
    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts to transactions of the given type.
    #[inline]
    #[must_use]
    pub const fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restricts to transactions whose description or category label
    /// contains the given substring (case-insensitive).
    #[inline]
    #[must_use]
    pub fn search<T: Into<String>>(mut self, term: T) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricts to transactions with amounts in `[min, max]`.
    #[inline]
    #[must_use]
    pub const fn amount_range(mut self, min: f64, max: f64) -> Self {
        self.min_amount = Some(min);
        self.max_amount = Some(max);
        self
    }

    /// Returns `true` if the transaction satisfies all set criteria.
    #[inline]
    pub(crate) fn matches(&self, tx: &Transaction) -> bool {
        self.matches_month(tx)
            && self.matches_category(tx)
            && self.matches_kind(tx)
            && self.matches_search(tx)
            && self.matches_amount(tx)
    }

    /// Checks the month criterion.
    fn matches_month(&self, tx: &Transaction) -> bool {
        self.month.is_none_or(|month| tx.month() == month)
    }

    /// Checks the category criterion.
    fn matches_category(&self, tx: &Transaction) -> bool {
        self.category.is_none_or(|category| tx.category == category)
    }

    /// Checks the type criterion.
    fn matches_kind(&self, tx: &Transaction) -> bool {
        self.kind.is_none_or(|kind| tx.kind == kind)
    }

    /// Checks the search criterion.
    fn matches_search(&self, tx: &Transaction) -> bool {
        self.search.as_ref().is_none_or(|term| {
            let term_lower = term.to_lowercase();
            tx.description.to_lowercase().contains(&term_lower)
                || tx.category.label().to_lowercase().contains(&term_lower)
        })
    }

    /// Checks the amount criteria.
    fn matches_amount(&self, tx: &Transaction) -> bool {
        self.min_amount.is_none_or(|min| tx.amount >= min)
            && self.max_amount.is_none_or(|max| tx.amount <= max)
    }
}

/// Builder for constructing a [`MoneyTracker`].
#[derive(Debug)]
pub struct MoneyTrackerBuilder<S: TransactionStorage> {
    /// Storage backend.
    storage: Option<S>,
    /// Collection persisted on first run when the slot is empty.
    seed: Vec<Transaction>,
    /// Selected-month override.
    selected_month: Option<Month>,
}

impl<S: TransactionStorage> MoneyTrackerBuilder<S> {
    /// Sets the storage backend.
    #[inline]
    #[must_use]
    pub fn storage(mut self, storage: S) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sets the collection persisted on first run, when the slot has
    /// never been written. Defaults to an empty collection.
    #[inline]
    #[must_use]
    pub fn seed(mut self, seed: Vec<Transaction>) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the initially selected month (default: the current
    /// calendar month).
    #[inline]
    #[must_use]
    pub const fn selected_month(mut self, month: Month) -> Self {
        self.selected_month = Some(month);
        self
    }

    /// Builds the tracker, hydrating it from storage.
    ///
    /// A failed load is not fatal: the tracker starts with an empty
    /// collection and reports the failure via
    /// [`MoneyTracker::load_error`]; persistence resumes on the next
    /// mutation.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Storage`] if no storage backend was
    /// provided.
    #[inline]
    pub fn build(self) -> Result<MoneyTracker<S>> {
        let storage = self
            .storage
            .ok_or_else(|| TrackerError::Storage("storage backend is required".into()))?;
        let (transactions, load_error) = hydrate(&storage, self.seed);
        Ok(MoneyTracker {
            storage,
            transactions,
            selected_month: self.selected_month.unwrap_or_else(Month::current),
            load_error,
        })
    }
}

/// Loads the initial collection, seeding the slot on first run.
fn load_or_seed<S: TransactionStorage>(storage: &S, seed: Vec<Transaction>) -> Result<Vec<Transaction>> {
    match storage.load()? {
        Some(transactions) => Ok(transactions),
        None => {
            storage.save(&seed)?;
            Ok(seed)
        }
    }
}

/// Hydrates from storage, degrading to an empty collection on failure.
fn hydrate<S: TransactionStorage>(
    storage: &S,
    seed: Vec<Transaction>,
) -> (Vec<Transaction>, Option<String>) {
    match load_or_seed(storage, seed) {
        Ok(transactions) => {
            tracing::debug!(count = transactions.len(), "transactions loaded");
            (transactions, None)
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load persisted transactions");
            (Vec::new(), Some(LOAD_ERROR_MESSAGE.to_owned()))
        }
    }
}

/// The transaction store.
///
/// Owns the collection (most recently added first) and the selected-month
/// scope. Derived reads recompute on every call; nothing is cached, so a
/// read immediately after a mutation always reflects it.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use moneytracker_rs::models::{Category, Month, NewTransaction, TransactionType};
/// use moneytracker_rs::storage::InMemoryStorage;
/// use moneytracker_rs::tracker::MoneyTracker;
///
/// let mut tracker = MoneyTracker::builder()
///     .storage(InMemoryStorage::new())
///     .selected_month(Month::new(2024, 1).unwrap())
///     .build()
///     .unwrap();
///
/// let _id = tracker
///     .add(NewTransaction {
///         amount: 2500.0,
///         description: "Salary".to_owned(),
///         category: Category::Income,
///         date: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
///         kind: TransactionType::Income,
///     })
///     .unwrap();
///
/// assert!((tracker.balance() - 2500.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug)]
pub struct MoneyTracker<S: TransactionStorage> {
    /// Storage backend mirroring the collection.
    storage: S,
    /// The collection, most recently added first.
    transactions: Vec<Transaction>,
    /// Month scope applied by month-scoped reads.
    selected_month: Month,
    /// Error message from a failed hydration, if any.
    load_error: Option<String>,
}

impl<S: TransactionStorage> MoneyTracker<S> {
    /// Creates a new builder for configuring the tracker.
    #[inline]
    #[must_use]
    pub const fn builder() -> MoneyTrackerBuilder<S> {
        MoneyTrackerBuilder {
            storage: None,
            seed: Vec::new(),
            selected_month: None,
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Adds a transaction, assigning it a fresh unique id.
    ///
    /// The transaction is prepended, keeping the raw collection in
    /// most-recently-added-first order. The whole collection is persisted
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails; the in-memory
    /// collection retains the new transaction either way.
    pub fn add(&mut self, draft: NewTransaction) -> Result<TransactionId> {
        let id = TransactionId::random();
        self.transactions.insert(0, draft.with_id(id.clone()));
        tracing::debug!(id = %id, "transaction added");
        self.persist()?;
        Ok(id)
    }

    /// Removes the transaction with the given id.
    ///
    /// An unknown id is a no-op, not an error. The collection is
    /// persisted either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn remove(&mut self, id: &TransactionId) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != *id);
        if self.transactions.len() != before {
            tracing::debug!(id = %id, "transaction removed");
        }
        self.persist()
    }

    /// Replaces the transaction whose id matches `tx.id`.
    ///
    /// No matching id is a no-op, not an error. The collection is
    /// persisted either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn update(&mut self, tx: Transaction) -> Result<()> {
        if let Some(existing) = self.transactions.iter_mut().find(|t| t.id == tx.id) {
            tracing::debug!(id = %tx.id, "transaction updated");
            *existing = tx;
        }
        self.persist()
    }

    /// Changes the month scope used by month-scoped reads.
    ///
    /// Does not touch the collection or storage.
    #[inline]
    pub const fn set_selected_month(&mut self, month: Month) {
        self.selected_month = month;
    }

    // ── State accessors ─────────────────────────────────────────────

    /// The raw collection, most recently added first.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The currently selected month.
    #[inline]
    #[must_use]
    pub const fn selected_month(&self) -> Month {
        self.selected_month
    }

    /// The error message from a failed hydration, if any.
    #[inline]
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Returns a reference to the storage backend.
    #[inline]
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    // ── Derived reads, selected-month scope ─────────────────────────

    /// The transactions falling in the selected month, in collection
    /// order.
    #[inline]
    #[must_use]
    pub fn current_month_transactions(&self) -> Vec<Transaction> {
        self.scoped().cloned().collect()
    }

    /// Sum of income amounts in the selected month.
    #[inline]
    #[must_use]
    pub fn total_income(&self) -> f64 {
        self.sum_scoped(TransactionType::Income)
    }

    /// Sum of expense amounts in the selected month.
    #[inline]
    #[must_use]
    pub fn total_expenses(&self) -> f64 {
        self.sum_scoped(TransactionType::Expense)
    }

    /// Income minus expenses for the selected month.
    #[inline]
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }

    /// Expense totals per category for the selected month.
    ///
    /// Categories with no expenses in scope are absent from the map, not
    /// present with a zero value.
    #[must_use]
    pub fn transactions_by_category(&self) -> BTreeMap<Category, f64> {
        let mut sums = BTreeMap::new();
        for tx in self.scoped().filter(|tx| tx.kind == TransactionType::Expense) {
            *sums.entry(tx.category).or_insert(0.0) += tx.amount;
        }
        sums
    }

    /// The most recent transactions in the selected month.
    ///
    /// Sorted by full timestamp descending, so same-day transactions keep
    /// their sub-day ordering, and truncated to `limit`. Exact timestamp
    /// ties keep their relative collection order (the sort is stable).
    /// See [`DEFAULT_RECENT_LIMIT`] for the conventional limit.
    #[must_use]
    pub fn recent_transactions(&self, limit: usize) -> Vec<Transaction> {
        let mut recent: Vec<&Transaction> = self.scoped().collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(limit);
        recent.into_iter().cloned().collect()
    }

    // ── Derived reads, arbitrary months ─────────────────────────────

    /// The summary for an arbitrary month, computed over the full
    /// collection regardless of the selected month.
    #[inline]
    #[must_use]
    pub fn monthly_summary(&self, month: Month) -> MonthlySummary {
        MonthlySummary::compute(month, &self.transactions)
    }

    /// One summary per distinct month present in the collection, most
    /// recent month first.
    #[must_use]
    pub fn all_months_summary(&self) -> Vec<MonthlySummary> {
        let months: BTreeSet<Month> = self.transactions.iter().map(Transaction::month).collect();
        months
            .into_iter()
            .rev()
            .map(|month| self.monthly_summary(month))
            .collect()
    }

    /// The transactions matching the given filter, in collection order.
    #[must_use]
    pub fn filter_transactions(&self, filter: &TransactionFilter) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .cloned()
            .collect()
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Iterator over the selected-month subset.
    fn scoped(&self) -> impl Iterator<Item = &Transaction> {
        let month = self.selected_month;
        self.transactions.iter().filter(move |tx| tx.month() == month)
    }

    /// Sums scoped amounts of the given type.
    fn sum_scoped(&self, kind: TransactionType) -> f64 {
        self.scoped()
            .filter(|tx| tx.kind == kind)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Writes the whole collection back to the storage slot.
    fn persist(&self) -> Result<()> {
        self.storage.save(&self.transactions)?;
        tracing::trace!(count = self.transactions.len(), "collection persisted");
        Ok(())
    }
}
