//! Implements a SQLite backed asset store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Row, params};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{Asset, NewAsset, UserID},
    stores::AssetStore,
};

/// The maximum number of asset snapshots returned for one user.
const ASSET_QUERY_LIMIT: u64 = 200;

/// Stores asset snapshots in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAssetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAssetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }

    fn map_row(row: &Row) -> Result<Asset, rusqlite::Error> {
        Ok(Asset {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            account: row.get(2)?,
            amount: row.get(3)?,
            date: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }
}

impl AssetStore for SQLiteAssetStore {
    /// Record a new asset snapshot in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn create(&mut self, user_id: UserID, asset: NewAsset) -> Result<Asset, Error> {
        let now = OffsetDateTime::now_utc();

        let asset = self
            .connection()?
            .prepare(
                "INSERT INTO asset (user_id, account, amount, date, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 RETURNING id, user_id, account, amount, date, notes, created_at, updated_at",
            )?
            .query_row(
                params![
                    user_id.as_i64(),
                    asset.account,
                    asset.amount,
                    asset.date,
                    asset.notes,
                    now,
                    now,
                ],
                Self::map_row,
            )?;

        Ok(asset)
    }

    /// Retrieve all of the user's asset snapshots, ordered by date ascending.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Asset>, Error> {
        self.connection()?
            .prepare(&format!(
                "SELECT id, user_id, account, amount, date, notes, created_at, updated_at
                 FROM asset
                 WHERE user_id = ?1
                 ORDER BY date ASC
                 LIMIT {ASSET_QUERY_LIMIT}"
            ))?
            .query_map(params![user_id.as_i64()], Self::map_row)?
            .map(|maybe_asset| maybe_asset.map_err(Error::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        models::{NewAsset, UserID},
        stores::AssetStore,
    };

    use super::SQLiteAssetStore;

    fn get_test_store() -> SQLiteAssetStore {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&connection).expect("Could not initialize database.");

        SQLiteAssetStore::new(Arc::new(Mutex::new(connection)))
    }

    const USER: UserID = UserID::new(1);

    #[test]
    fn create_and_list_assets() {
        let mut store = get_test_store();

        let inserted = store
            .create(
                USER,
                NewAsset {
                    account: "savings".to_string(),
                    amount: 1_000_000,
                    date: date!(2024 - 06 - 30),
                    notes: "mid-year check".to_string(),
                },
            )
            .unwrap();

        let assets = store.get_by_user(USER).unwrap();

        assert_eq!(assets, vec![inserted]);
    }

    #[test]
    fn assets_are_scoped_to_their_user() {
        let mut store = get_test_store();

        store
            .create(
                USER,
                NewAsset {
                    account: "savings".to_string(),
                    amount: 1_000_000,
                    date: date!(2024 - 06 - 30),
                    notes: String::new(),
                },
            )
            .unwrap();

        assert!(store.get_by_user(UserID::new(2)).unwrap().is_empty());
    }

    #[test]
    fn assets_are_ordered_by_date() {
        let mut store = get_test_store();

        for (amount, date) in [
            (200, date!(2024 - 03 - 31)),
            (100, date!(2024 - 01 - 31)),
            (300, date!(2024 - 06 - 30)),
        ] {
            store
                .create(
                    USER,
                    NewAsset {
                        account: "savings".to_string(),
                        amount,
                        date,
                        notes: String::new(),
                    },
                )
                .unwrap();
        }

        let amounts: Vec<_> = store
            .get_by_user(USER)
            .unwrap()
            .iter()
            .map(|asset| asset.amount)
            .collect();

        assert_eq!(amounts, vec![100, 200, 300]);
    }
}
