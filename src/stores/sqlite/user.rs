//! Implements a SQLite backed user store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use email_address::EmailAddress;
use rusqlite::{Connection, Row, params, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{PasswordHash, User, UserID},
    stores::UserStore,
};

/// Stores users in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }

    fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
        let email_text: String = row.get(2)?;
        let email = EmailAddress::from_str(&email_text)
            .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error)))?;
        let password_hash: String = row.get(3)?;

        Ok(User::new(
            UserID::new(row.get(0)?),
            row.get(1)?,
            email,
            PasswordHash::new_unchecked(&password_hash),
            row.get(4)?,
        ))
    }
}

impl UserStore for SQLiteUserStore {
    /// Create a new user in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateEmail] if `email` is already registered,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(
        &mut self,
        username: &str,
        email: EmailAddress,
        password_hash: PasswordHash,
    ) -> Result<User, Error> {
        let user = self
            .connection()?
            .prepare(
                "INSERT INTO user (username, email, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, username, email, password_hash, created_at",
            )?
            .query_row(
                params![
                    username,
                    email.as_str(),
                    password_hash.as_str(),
                    OffsetDateTime::now_utc(),
                ],
                Self::map_row,
            )?;

        Ok(user)
    }

    /// Retrieve a user in the database by their `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid user,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: UserID) -> Result<User, Error> {
        let user = self
            .connection()?
            .prepare(
                "SELECT id, username, email, password_hash, created_at FROM user WHERE id = ?1",
            )?
            .query_row(params![id.as_i64()], Self::map_row)?;

        Ok(user)
    }

    /// Retrieve a user in the database by their `email` address.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `email` does not refer to a registered user,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        let user = self
            .connection()?
            .prepare(
                "SELECT id, username, email, password_hash, created_at FROM user WHERE email = ?1",
            )?
            .query_row(params![email], Self::map_row)?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        str::FromStr,
        sync::{Arc, Mutex},
    };

    use email_address::EmailAddress;
    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::PasswordHash,
        stores::UserStore,
    };

    use super::SQLiteUserStore;

    fn get_test_store() -> SQLiteUserStore {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&connection).expect("Could not initialize database.");

        SQLiteUserStore::new(Arc::new(Mutex::new(connection)))
    }

    fn test_email() -> EmailAddress {
        EmailAddress::from_str("test@test.com").unwrap()
    }

    #[test]
    fn create_and_get_user() {
        let mut store = get_test_store();

        let inserted = store
            .create("tester", test_email(), PasswordHash::new_unchecked("hash"))
            .unwrap();

        let retrieved = store.get(inserted.id()).unwrap();

        assert_eq!(inserted, retrieved);
        assert_eq!(retrieved.username(), "tester");
        assert_eq!(retrieved.email(), &test_email());
    }

    #[test]
    fn get_by_email_finds_user() {
        let mut store = get_test_store();

        let inserted = store
            .create("tester", test_email(), PasswordHash::new_unchecked("hash"))
            .unwrap();

        let retrieved = store.get_by_email("test@test.com").unwrap();

        assert_eq!(inserted, retrieved);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut store = get_test_store();

        store
            .create("tester", test_email(), PasswordHash::new_unchecked("hash"))
            .unwrap();

        let result = store.create("other", test_email(), PasswordHash::new_unchecked("hash2"));

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[test]
    fn unknown_email_returns_not_found() {
        let store = get_test_store();

        let result = store.get_by_email("nobody@test.com");

        assert_eq!(result, Err(Error::NotFound));
    }
}
