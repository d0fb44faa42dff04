//! The month-of-year filter shared by every transaction query.

use serde::Deserialize;
use time::Month;

/// The SQL predicate that selects transactions sold in the month bound to `:month`.
///
/// Binding `NULL` to `:month` makes the predicate false for every row.
pub(crate) const MONTH_PREDICATE: &str =
    "CAST(strftime('%m', date_of_sale) AS INTEGER) = :month";

/// The query parameters for endpoints that only take a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The full English name of the month, e.g. "March".
    pub month: Option<String>,
}

/// Selects transactions sold in a given calendar month, in any year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthFilter {
    month: Option<Month>,
}

impl MonthFilter {
    /// Create a filter from a case-sensitive English month name such as "March".
    ///
    /// A missing or unrecognized name produces a filter that matches nothing,
    /// so queries using it return empty results rather than an error.
    pub fn from_name(name: Option<&str>) -> Self {
        let month = name.and_then(|name| name.parse::<Month>().ok());

        if month.is_none() {
            tracing::debug!("{name:?} is not a month name, the filter will match nothing");
        }

        Self { month }
    }

    /// The month this filter selects, if any.
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// The value to bind to `:month` in [MONTH_PREDICATE].
    pub(crate) fn ordinal(&self) -> Option<u8> {
        self.month.map(u8::from)
    }
}

impl From<&MonthQuery> for MonthFilter {
    fn from(query: &MonthQuery) -> Self {
        Self::from_name(query.month.as_deref())
    }
}
