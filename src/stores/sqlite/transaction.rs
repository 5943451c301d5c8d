//! Implements a SQLite backed transaction store.

use std::{
    str::FromStr,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{Connection, Row, params, params_from_iter, types::{Type, Value}};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, TransactionType, UserID},
    stores::{
        TransactionStore,
        transaction::{CategorySummary, DEFAULT_QUERY_LIMIT, TransactionQuery},
    },
};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, type, amount, category, date, notes, is_active, created_at, updated_at";

/// Stores transactions in a SQLite database.
///
/// Deleting a transaction marks it inactive; every read filters on `is_active`.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }

    fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
        let type_text: String = row.get(2)?;
        let transaction_type = TransactionType::from_str(&type_text).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(2, Type::Text, error.into())
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            user_id: UserID::new(row.get(1)?),
            transaction_type,
            amount: row.get(3)?,
            category: row.get(4)?,
            date: row.get(5)?,
            notes: row.get(6)?,
            is_active: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn create(
        &mut self,
        user_id: UserID,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();

        let transaction = self
            .connection()?
            .prepare(&format!(
                "INSERT INTO \"transaction\" (user_id, type, amount, category, date, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    user_id.as_i64(),
                    transaction.transaction_type.as_str(),
                    transaction.amount,
                    transaction.category,
                    transaction.date,
                    transaction.notes,
                    now,
                    now,
                ],
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve an active transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to one of the user's active transactions,
    /// - [Error::SqlError] if there is some other SQL error.
    fn get(&self, user_id: UserID, id: DatabaseID) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
                 WHERE id = ?1 AND user_id = ?2 AND is_active = 1"
            ))?
            .query_row(params![id, user_id.as_i64()], Self::map_row)?;

        Ok(transaction)
    }

    /// Query for the user's active transactions in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn get_query(
        &self,
        user_id: UserID,
        query: TransactionQuery,
    ) -> Result<Vec<Transaction>, Error> {
        let mut where_clause_parts = vec!["user_id = ?1".to_string(), "is_active = 1".to_string()];
        let mut query_parameters = vec![Value::Integer(user_id.as_i64())];

        if let Some(date_start) = query.date_start {
            where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(date_start.to_string()));
        }

        if let Some(date_end) = query.date_end {
            where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(date_end.to_string()));
        }

        if let Some(category) = query.category {
            where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
            query_parameters.push(Value::Text(category));
        }

        let limit = query.limit.unwrap_or(DEFAULT_QUERY_LIMIT);
        let query_string = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
             WHERE {}
             ORDER BY date ASC
             LIMIT {limit}",
            where_clause_parts.join(" AND ")
        );

        self.connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Overwrite an active transaction's details in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to one of the user's active transactions,
    /// - [Error::SqlError] if there is some other SQL error.
    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let transaction = self
            .connection()?
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET type = ?1, amount = ?2, category = ?3, date = ?4, notes = ?5, updated_at = ?6
                 WHERE id = ?7 AND user_id = ?8 AND is_active = 1
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.transaction_type.as_str(),
                    transaction.amount,
                    transaction.category,
                    transaction.date,
                    transaction.notes,
                    OffsetDateTime::now_utc(),
                    id,
                    user_id.as_i64(),
                ],
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Soft delete a transaction by marking it inactive.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to one of the user's active transactions,
    /// - [Error::SqlError] if there is some other SQL error.
    fn delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error> {
        let rows_changed = self.connection()?.execute(
            "UPDATE \"transaction\"
             SET is_active = 0, updated_at = ?1
             WHERE id = ?2 AND user_id = ?3 AND is_active = 1",
            params![OffsetDateTime::now_utc(), id, user_id.as_i64()],
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }

    /// Total the user's active transactions per category between `date_start` and `date_end`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn category_summary(
        &self,
        user_id: UserID,
        date_start: Date,
        date_end: Date,
    ) -> Result<Vec<CategorySummary>, Error> {
        self.connection()?
            .prepare(
                "SELECT category, SUM(amount) AS total_amount, COUNT(id) AS count
                 FROM \"transaction\"
                 WHERE user_id = ?1 AND is_active = 1 AND date BETWEEN ?2 AND ?3
                 GROUP BY category
                 ORDER BY category ASC",
            )?
            .query_map(
                params![user_id.as_i64(), date_start, date_end],
                |row| {
                    Ok(CategorySummary {
                        category: row.get(0)?,
                        total_amount: row.get(1)?,
                        count: row.get::<_, i64>(2)? as u64,
                    })
                },
            )?
            .map(|maybe_summary| maybe_summary.map_err(Error::from))
            .collect()
    }
}
