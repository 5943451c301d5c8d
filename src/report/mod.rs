//! Spend report aggregation.
//!
//! A report request resolves a year and quarter into month-aligned [DateInterval]s, fetches
//! per-category sums for each interval from a [SpendingStore](crate::stores::SpendingStore), and
//! normalizes each month against the report's fixed category taxonomy so the client always
//! receives a complete, consistently ordered category list.

mod aggregate;
mod categories;
pub(crate) mod endpoints;
mod normalize;
mod quarter;

pub use aggregate::{MonthlyCashflow, QuarterReport, aggregate_annual_cashflow, aggregate_quarter};
pub use categories::{
    ESSENTIAL_CATEGORIES, NON_ESSENTIAL_CATEGORIES, ReportKind, SHOPPING_CATEGORIES,
};
pub use normalize::{CategoryAmount, normalize};
pub use quarter::{DateInterval, MONTHS_PER_QUARTER, resolve_quarter, resolve_year};
