//! Defines the store collaborator consumed by the report aggregator.

use crate::{
    Error,
    models::UserID,
    report::{CategoryAmount, DateInterval},
};

/// Summed income and expense totals over one date interval.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CashflowSummary {
    /// Total income in minor currency units.
    pub income: i64,
    /// Total expenses in minor currency units.
    pub expense: i64,
}

/// Per-interval aggregate queries over a user's active transactions.
///
/// This is the only collaborator the report aggregator depends on, so report logic can be tested
/// against scripted implementations.
pub trait SpendingStore {
    /// Sum the user's active transactions per category within `interval`, restricted to
    /// `categories`.
    ///
    /// Categories without any transactions in the interval are absent from the result; the
    /// report layer fills those gaps.
    fn fetch_category_sums(
        &self,
        user_id: UserID,
        interval: &DateInterval,
        categories: &[&str],
    ) -> Result<Vec<CategoryAmount>, Error>;

    /// Sum the user's active income and expense amounts within `interval`.
    fn fetch_cashflow(
        &self,
        user_id: UserID,
        interval: &DateInterval,
    ) -> Result<CashflowSummary, Error>;
}
