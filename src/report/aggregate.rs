//! Aggregates per-month category sums into quarterly and annual reports.

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::UserID,
    report::{
        normalize::{CategoryAmount, normalize},
        quarter::{resolve_quarter, resolve_year},
    },
    stores::SpendingStore,
};

/// Per-category spend sums for each month of one quarter, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterReport {
    /// The first month of the quarter.
    pub month1: Vec<CategoryAmount>,
    /// The second month of the quarter.
    pub month2: Vec<CategoryAmount>,
    /// The third month of the quarter.
    pub month3: Vec<CategoryAmount>,
}

/// Summed income and expenses for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCashflow {
    /// The month number, 1 (January) through 12 (December).
    pub month: u8,
    /// Total income in minor currency units.
    pub income: i64,
    /// Total expenses in minor currency units.
    pub expense: i64,
    /// `income - expense`.
    pub net: i64,
}

/// Aggregate a user's spending for one quarter, one normalized category list per month.
///
/// Each of the quarter's three month intervals is fetched from `store` exactly once, in
/// chronological order, and normalized against `categories` so that every month contains exactly
/// one entry per expected category (missing categories get amount `0`).
///
/// # Errors
/// Returns [Error::InvalidYear] or [Error::InvalidQuarter] for malformed input, and
/// [Error::UpstreamFetch] wrapping the store's error as soon as any month's fetch fails. On a
/// fetch failure the remaining months are not fetched and no partial report is returned.
pub fn aggregate_quarter<S>(
    store: &S,
    user_id: UserID,
    year: i32,
    quarter: u8,
    categories: &[&str],
) -> Result<QuarterReport, Error>
where
    S: SpendingStore,
{
    let intervals = resolve_quarter(year, quarter)?;

    let fetch_month = |interval| {
        let rows = store
            .fetch_category_sums(user_id, interval, categories)
            .map_err(|error| Error::UpstreamFetch(Box::new(error)))?;

        Ok::<_, Error>(normalize(&rows, categories))
    };

    Ok(QuarterReport {
        month1: fetch_month(&intervals[0])?,
        month2: fetch_month(&intervals[1])?,
        month3: fetch_month(&intervals[2])?,
    })
}

/// Aggregate a user's income and expense totals for each month of `year`.
///
/// The twelve month intervals are fetched in chronological order with the same fail-fast
/// behavior as [aggregate_quarter]. Months without any transactions report zero income and
/// expenses.
///
/// # Errors
/// Returns [Error::InvalidYear] for malformed input, and [Error::UpstreamFetch] wrapping the
/// store's error as soon as any month's fetch fails.
pub fn aggregate_annual_cashflow<S>(
    store: &S,
    user_id: UserID,
    year: i32,
) -> Result<Vec<MonthlyCashflow>, Error>
where
    S: SpendingStore,
{
    let intervals = resolve_year(year)?;

    intervals
        .iter()
        .enumerate()
        .map(|(index, interval)| {
            let summary = store
                .fetch_cashflow(user_id, interval)
                .map_err(|error| Error::UpstreamFetch(Box::new(error)))?;

            Ok(MonthlyCashflow {
                month: index as u8 + 1,
                income: summary.income,
                expense: summary.expense,
                net: summary.income - summary.expense,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use crate::{
        Error,
        models::UserID,
        report::{
            aggregate::{MonthlyCashflow, aggregate_annual_cashflow, aggregate_quarter},
            normalize::CategoryAmount,
            quarter::DateInterval,
        },
        stores::{CashflowSummary, SpendingStore},
    };

    /// A scripted store that returns one canned response per fetch, in order.
    struct FakeSpendingStore {
        responses: RefCell<Vec<Result<Vec<CategoryAmount>, Error>>>,
        cashflows: RefCell<Vec<Result<CashflowSummary, Error>>>,
        fetch_count: RefCell<usize>,
    }

    impl FakeSpendingStore {
        fn with_category_sums(responses: Vec<Result<Vec<CategoryAmount>, Error>>) -> Self {
            Self {
                responses: RefCell::new(responses),
                cashflows: RefCell::new(Vec::new()),
                fetch_count: RefCell::new(0),
            }
        }

        fn with_cashflows(cashflows: Vec<Result<CashflowSummary, Error>>) -> Self {
            Self {
                responses: RefCell::new(Vec::new()),
                cashflows: RefCell::new(cashflows),
                fetch_count: RefCell::new(0),
            }
        }

        fn fetch_count(&self) -> usize {
            *self.fetch_count.borrow()
        }
    }

    impl SpendingStore for FakeSpendingStore {
        fn fetch_category_sums(
            &self,
            _user_id: UserID,
            _interval: &DateInterval,
            _categories: &[&str],
        ) -> Result<Vec<CategoryAmount>, Error> {
            *self.fetch_count.borrow_mut() += 1;
            self.responses.borrow_mut().remove(0)
        }

        fn fetch_cashflow(
            &self,
            _user_id: UserID,
            _interval: &DateInterval,
        ) -> Result<CashflowSummary, Error> {
            *self.fetch_count.borrow_mut() += 1;
            self.cashflows.borrow_mut().remove(0)
        }
    }

    fn row(category: &str, amount: i64) -> CategoryAmount {
        CategoryAmount {
            category: category.to_string(),
            amount,
        }
    }

    #[test]
    fn sparse_store_rows_produce_complete_months() {
        let store = FakeSpendingStore::with_category_sums(vec![
            Ok(vec![row("makan", 5000)]),
            Ok(vec![]),
            Ok(vec![]),
        ]);

        let report =
            aggregate_quarter(&store, UserID::new(1), 2024, 1, &["makan", "cafe"]).unwrap();

        assert_eq!(report.month1, vec![row("makan", 5000), row("cafe", 0)]);
        assert_eq!(report.month2, vec![row("makan", 0), row("cafe", 0)]);
        assert_eq!(report.month3, vec![row("makan", 0), row("cafe", 0)]);
    }

    #[test]
    fn failed_fetch_fails_fast_without_partial_results() {
        let store = FakeSpendingStore::with_category_sums(vec![
            Ok(vec![row("makan", 5000)]),
            Err(Error::DatabaseLock),
            Ok(vec![]),
        ]);

        let result = aggregate_quarter(&store, UserID::new(1), 2024, 1, &["makan"]);

        assert_eq!(
            result,
            Err(Error::UpstreamFetch(Box::new(Error::DatabaseLock)))
        );
        // The third month must not have been fetched.
        assert_eq!(store.fetch_count(), 2);
    }

    #[test]
    fn invalid_input_is_rejected_before_any_fetch() {
        let store = FakeSpendingStore::with_category_sums(vec![]);

        assert_eq!(
            aggregate_quarter(&store, UserID::new(1), 2024, 5, &["makan"]),
            Err(Error::InvalidQuarter(5))
        );
        assert_eq!(
            aggregate_quarter(&store, UserID::new(1), 0, 1, &["makan"]),
            Err(Error::InvalidYear(0))
        );
        assert_eq!(store.fetch_count(), 0);
    }

    #[test]
    fn annual_cashflow_reports_twelve_months_with_net() {
        let mut cashflows = vec![
            Ok(CashflowSummary {
                income: 10_000,
                expense: 7_500,
            }),
        ];
        cashflows.extend((0..11).map(|_| {
            Ok(CashflowSummary {
                income: 0,
                expense: 0,
            })
        }));
        let store = FakeSpendingStore::with_cashflows(cashflows);

        let report = aggregate_annual_cashflow(&store, UserID::new(1), 2024).unwrap();

        assert_eq!(report.len(), 12);
        assert_eq!(
            report[0],
            MonthlyCashflow {
                month: 1,
                income: 10_000,
                expense: 7_500,
                net: 2_500,
            }
        );
        assert!(report[1..].iter().all(|month| month.net == 0));
        assert_eq!(
            report.iter().map(|month| month.month).collect::<Vec<_>>(),
            (1..=12).collect::<Vec<_>>()
        );
    }

    #[test]
    fn annual_cashflow_fails_fast_on_store_error() {
        let store = FakeSpendingStore::with_cashflows(vec![
            Ok(CashflowSummary {
                income: 1,
                expense: 1,
            }),
            Err(Error::DatabaseLock),
        ]);

        let result = aggregate_annual_cashflow(&store, UserID::new(1), 2024);

        assert_eq!(
            result,
            Err(Error::UpstreamFetch(Box::new(Error::DatabaseLock)))
        );
        assert_eq!(store.fetch_count(), 2);
    }
}
