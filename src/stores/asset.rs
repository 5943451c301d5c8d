//! Defines the asset store trait.

use crate::{
    Error,
    models::{Asset, NewAsset, UserID},
};

/// Handles the creation and retrieval of asset snapshots.
pub trait AssetStore {
    /// Record a new asset snapshot in the store.
    fn create(&mut self, user_id: UserID, asset: NewAsset) -> Result<Asset, Error>;

    /// Retrieve all of a user's asset snapshots, ordered by date ascending.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Asset>, Error>;
}
