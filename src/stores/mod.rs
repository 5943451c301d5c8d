//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod asset;
mod spending;
mod transaction;
mod user;

pub mod sqlite;

pub use asset::AssetStore;
pub use spending::{CashflowSummary, SpendingStore};
pub use transaction::{CategorySummary, TransactionQuery, TransactionStore};
pub use user::UserStore;
