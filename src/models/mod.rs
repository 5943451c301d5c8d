//! This module defines the domain data types.

pub use asset::{Asset, NewAsset};
pub use password::{PasswordHash, ValidatedPassword};
pub use transaction::{NewTransaction, Transaction, TransactionType};
pub use user::{User, UserID};

mod asset;
mod password;
mod transaction;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
