//! Defines the transaction store trait.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, UserID},
};

/// The maximum number of transactions returned by a single list query.
pub(crate) const DEFAULT_QUERY_LIMIT: u64 = 200;

/// Defines how transactions should be fetched from [TransactionStore::get_query].
///
/// All fields are optional filters; an empty query returns the user's active transactions up to
/// the default limit, ordered by date ascending.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    /// Include transactions on or after this date.
    pub date_start: Option<Date>,
    /// Include transactions on or before this date.
    pub date_end: Option<Date>,
    /// Include only transactions with this category.
    pub category: Option<String>,
    /// Selects up to the first N transactions. Defaults to 200.
    pub limit: Option<u64>,
}

/// A per-category total over some date range, as returned by the monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// The spend category.
    pub category: String,
    /// The summed amount in minor currency units.
    pub total_amount: i64,
    /// How many transactions contributed to the total.
    pub count: u64,
}

/// Handles the creation and retrieval of transactions.
///
/// Every operation is scoped to a single user; implementations must never return or modify
/// another user's transactions.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, user_id: UserID, transaction: NewTransaction)
    -> Result<Transaction, Error>;

    /// Retrieve an active transaction by its ID.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist, was deleted, or belongs to
    /// another user.
    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Transaction, Error>;

    /// Retrieve the user's active transactions in the way defined by `query`.
    fn get_query(&self, user_id: UserID, query: TransactionQuery)
    -> Result<Vec<Transaction>, Error>;

    /// Overwrite an active transaction's details.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist, was deleted, or belongs to
    /// another user.
    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error>;

    /// Soft delete a transaction (mark it inactive).
    ///
    /// # Errors
    /// Returns [Error::NotFound] if the transaction does not exist, was already deleted, or
    /// belongs to another user.
    fn delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error>;

    /// Total the user's active transactions per category between `date_start` and `date_end`
    /// (inclusive).
    ///
    /// Only categories with at least one transaction appear in the result.
    fn category_summary(
        &self,
        user_id: UserID,
        date_start: Date,
        date_end: Date,
    ) -> Result<Vec<CategorySummary>, Error>;
}
