//! The fixed category taxonomies that each report type must always show.

/// Categories for day-to-day necessary spending.
pub const ESSENTIAL_CATEGORIES: &[&str] =
    &["makan", "cafe", "utils", "errand", "bensin", "olahraga"];

/// Categories for discretionary spending.
pub const NON_ESSENTIAL_CATEGORIES: &[&str] = &[
    "misc",
    "family",
    "transport",
    "traveling",
    "healthcare",
    "date",
];

/// Categories for shopping spending.
pub const SHOPPING_CATEGORIES: &[&str] = &["belanja"];

/// The report types with a fixed category taxonomy.
///
/// Which categories belong to which report type is configuration owned by the caller of the
/// report aggregator, not by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Day-to-day necessary spending.
    Essentials,
    /// Discretionary spending.
    NonEssentials,
    /// Shopping spending.
    Shopping,
}

impl ReportKind {
    /// The ordered category list this report type must always show.
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Essentials => ESSENTIAL_CATEGORIES,
            Self::NonEssentials => NON_ESSENTIAL_CATEGORIES,
            Self::Shopping => SHOPPING_CATEGORIES,
        }
    }
}
