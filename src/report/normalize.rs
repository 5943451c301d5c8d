//! Fills sparse per-category aggregates so every expected category is present.

use serde::{Deserialize, Serialize};

/// A summed amount for a single spend category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAmount {
    /// The spend category, e.g. "makan".
    pub category: String,
    /// The summed amount in minor currency units.
    pub amount: i64,
}

/// Normalize raw aggregation rows against an expected category list.
///
/// The output contains exactly one entry per name in `expected`, in `expected`'s order. A
/// category present in `rows` keeps its amount; a missing one is synthesized with amount `0`.
///
/// Rows whose category is not in `expected` are dropped: reports are scoped to a known category
/// taxonomy and stray categories (e.g. from old data) must not change the report layout.
pub fn normalize(rows: &[CategoryAmount], expected: &[&str]) -> Vec<CategoryAmount> {
    expected
        .iter()
        .map(|&category| {
            let amount = rows
                .iter()
                .find(|row| row.category == category)
                .map_or(0, |row| row.amount);

            CategoryAmount {
                category: category.to_string(),
                amount,
            }
        })
        .collect()
}
