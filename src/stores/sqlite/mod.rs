//! SQLite backed implementations of the store traits.

mod asset;
mod spending;
mod transaction;
mod user;

pub use asset::SQLiteAssetStore;
pub use spending::SQLiteSpendingStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;
