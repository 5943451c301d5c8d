//! Implements the SQLite backed aggregate queries consumed by the report layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params, params_from_iter, types::Value};

use crate::{
    Error,
    models::UserID,
    report::{CategoryAmount, DateInterval},
    stores::{CashflowSummary, SpendingStore},
};

/// Runs per-interval aggregate queries against a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteSpendingStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteSpendingStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection.lock().map_err(|_| Error::DatabaseLock)
    }
}

impl SpendingStore for SQLiteSpendingStore {
    /// Sum the user's active transactions per category within `interval`.
    ///
    /// The category list is bound as query parameters, never formatted into the SQL text, so
    /// category names cannot alter the query.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn fetch_category_sums(
        &self,
        user_id: UserID,
        interval: &DateInterval,
        categories: &[&str],
    ) -> Result<Vec<CategoryAmount>, Error> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let mut query_parameters = vec![
            Value::Integer(user_id.as_i64()),
            Value::Text(interval.start.to_string()),
            Value::Text(interval.end.to_string()),
        ];
        let placeholders: Vec<String> = categories
            .iter()
            .map(|&category| {
                query_parameters.push(Value::Text(category.to_string()));
                format!("?{}", query_parameters.len())
            })
            .collect();

        let query_string = format!(
            "SELECT category, SUM(amount) AS amount
             FROM \"transaction\"
             WHERE user_id = ?1 AND is_active = 1 AND date BETWEEN ?2 AND ?3
                 AND category IN ({})
             GROUP BY category
             ORDER BY category ASC",
            placeholders.join(", ")
        );

        self.connection()?
            .prepare(&query_string)?
            .query_map(params_from_iter(query_parameters.iter()), |row| {
                Ok(CategoryAmount {
                    category: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?
            .map(|maybe_row| maybe_row.map_err(Error::from))
            .collect()
    }

    /// Sum the user's active income and expense amounts within `interval`.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL error.
    fn fetch_cashflow(
        &self,
        user_id: UserID,
        interval: &DateInterval,
    ) -> Result<CashflowSummary, Error> {
        let summary = self
            .connection()?
            .prepare(
                "SELECT
                     COALESCE(SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END), 0),
                     COALESCE(SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END), 0)
                 FROM \"transaction\"
                 WHERE user_id = ?1 AND is_active = 1 AND date BETWEEN ?2 AND ?3",
            )?
            .query_row(
                params![user_id.as_i64(), interval.start, interval.end],
                |row| {
                    Ok(CashflowSummary {
                        income: row.get(0)?,
                        expense: row.get(1)?,
                    })
                },
            )?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        models::{NewTransaction, TransactionType, UserID},
        report::{CategoryAmount, DateInterval},
        stores::{CashflowSummary, SpendingStore, TransactionStore},
        stores::sqlite::SQLiteTransactionStore,
    };

    use super::SQLiteSpendingStore;

    const USER: UserID = UserID::new(1);

    fn get_test_stores() -> (SQLiteSpendingStore, SQLiteTransactionStore) {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        initialize(&connection).expect("Could not initialize database.");
        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteSpendingStore::new(connection.clone()),
            SQLiteTransactionStore::new(connection),
        )
    }

    fn insert(
        store: &mut SQLiteTransactionStore,
        user_id: UserID,
        transaction_type: TransactionType,
        amount: i64,
        category: &str,
        date: time::Date,
    ) {
        store
            .create(
                user_id,
                NewTransaction {
                    transaction_type,
                    amount,
                    category: category.to_string(),
                    date,
                    notes: String::new(),
                },
            )
            .unwrap();
    }

    fn january() -> DateInterval {
        DateInterval {
            start: date!(2024 - 01 - 01),
            end: date!(2024 - 01 - 31),
        }
    }

    #[test]
    fn category_sums_group_by_category_within_interval() {
        let (spending_store, mut transaction_store) = get_test_stores();

        let expense = TransactionType::Expense;
        insert(&mut transaction_store, USER, expense, 100, "makan", date!(2024 - 01 - 05));
        insert(&mut transaction_store, USER, expense, 150, "makan", date!(2024 - 01 - 25));
        insert(&mut transaction_store, USER, expense, 300, "cafe", date!(2024 - 01 - 10));
        // Outside of the interval.
        insert(&mut transaction_store, USER, expense, 999, "makan", date!(2024 - 02 - 01));
        // Not in the requested category list.
        insert(&mut transaction_store, USER, expense, 999, "bensin", date!(2024 - 01 - 15));
        // Another user's data.
        insert(&mut transaction_store, UserID::new(2), expense, 999, "makan", date!(2024 - 01 - 15));

        let sums = spending_store
            .fetch_category_sums(USER, &january(), &["makan", "cafe"])
            .unwrap();

        assert_eq!(
            sums,
            vec![
                CategoryAmount {
                    category: "cafe".to_string(),
                    amount: 300,
                },
                CategoryAmount {
                    category: "makan".to_string(),
                    amount: 250,
                },
            ]
        );
    }

    #[test]
    fn category_names_are_bound_not_interpolated() {
        let (spending_store, mut transaction_store) = get_test_stores();

        let hostile_category = "mak'an; DROP TABLE \"transaction\"; --";
        insert(
            &mut transaction_store,
            USER,
            TransactionType::Expense,
            100,
            hostile_category,
            date!(2024 - 01 - 05),
        );

        let sums = spending_store
            .fetch_category_sums(USER, &january(), &[hostile_category])
            .unwrap();

        assert_eq!(
            sums,
            vec![CategoryAmount {
                category: hostile_category.to_string(),
                amount: 100,
            }]
        );
    }

    #[test]
    fn empty_category_list_returns_no_rows() {
        let (spending_store, mut transaction_store) = get_test_stores();

        insert(
            &mut transaction_store,
            USER,
            TransactionType::Expense,
            100,
            "makan",
            date!(2024 - 01 - 05),
        );

        assert!(spending_store
            .fetch_category_sums(USER, &january(), &[])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn deleted_transactions_are_excluded_from_sums() {
        let (spending_store, mut transaction_store) = get_test_stores();

        let transaction = transaction_store
            .create(
                USER,
                NewTransaction {
                    transaction_type: TransactionType::Expense,
                    amount: 100,
                    category: "makan".to_string(),
                    date: date!(2024 - 01 - 05),
                    notes: String::new(),
                },
            )
            .unwrap();
        transaction_store.delete(USER, transaction.id).unwrap();

        assert!(spending_store
            .fetch_category_sums(USER, &january(), &["makan"])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn cashflow_sums_income_and_expense_separately() {
        let (spending_store, mut transaction_store) = get_test_stores();

        insert(&mut transaction_store, USER, TransactionType::Income, 10_000, "salary", date!(2024 - 01 - 01));
        insert(&mut transaction_store, USER, TransactionType::Expense, 3_000, "makan", date!(2024 - 01 - 10));
        insert(&mut transaction_store, USER, TransactionType::Expense, 1_500, "cafe", date!(2024 - 01 - 20));

        let summary = spending_store.fetch_cashflow(USER, &january()).unwrap();

        assert_eq!(
            summary,
            CashflowSummary {
                income: 10_000,
                expense: 4_500,
            }
        );
    }

    #[test]
    fn cashflow_is_zero_for_empty_interval() {
        let (spending_store, _) = get_test_stores();

        let summary = spending_store.fetch_cashflow(USER, &january()).unwrap();

        assert_eq!(summary, CashflowSummary::default());
    }
}
