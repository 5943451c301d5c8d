//! This file defines the type `Transaction`, the core type of the money tracking part of the
//! application.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::models::{DatabaseID, UserID};

/// Whether a transaction brought money in or took money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The text form used for storage and over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("\"{other}\" is not a valid transaction type")),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Deleting a transaction only deactivates it (`is_active` becomes false); stores filter
/// deactivated transactions out of every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The ID of the user that created this transaction.
    pub user_id: UserID,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money in minor currency units (e.g. cents).
    pub amount: i64,
    /// A user-assigned spend classification, e.g. "makan".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// A free-form note about the transaction.
    pub notes: String,
    /// False once the transaction has been deleted.
    pub is_active: bool,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last modified.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The data needed to create or update a transaction.
///
/// This is the request payload for the create and update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money in minor currency units (e.g. cents).
    pub amount: i64,
    /// A user-assigned spend classification, e.g. "makan".
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// A free-form note about the transaction.
    #[serde(default)]
    pub notes: String,
}
