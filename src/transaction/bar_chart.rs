//! A histogram of a month's transactions by price range.
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::{Serialize, Serializer};

use crate::{
    Error,
    db::{ReportState, lock_connection},
};

use super::month::{MONTH_PREDICATE, MonthFilter, MonthQuery};

/// The width of each price range.
pub const PRICE_RANGE_WIDTH: u32 = 100;

/// Prices from here up all fall into [PriceRange::Overflow].
pub const PRICE_RANGE_LIMIT: u32 = 900;

/// The label of the open-ended price range.
pub const OVERFLOW_LABEL: &str = "901+";

/// A price range in the histogram, identified by its lower bound.
///
/// Orders numeric ranges by lower bound, followed by the open-ended range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PriceRange {
    /// Prices in `[lower_bound, lower_bound + PRICE_RANGE_WIDTH)`.
    From(u32),
    /// Every price that is not in one of the [PriceRange::From] ranges.
    Overflow,
}

impl Serialize for PriceRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PriceRange::From(lower_bound) => serializer.serialize_u32(*lower_bound),
            PriceRange::Overflow => serializer.serialize_str(OVERFLOW_LABEL),
        }
    }
}

/// The number of transactions in one price range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeCount {
    /// The price range, serialized as its lower bound.
    pub bucket_lower_bound: PriceRange,
    /// The number of transactions in the range.
    pub count: u64,
}

/// Count the transactions in each price range for the month selected by `filter`.
///
/// Ranges without transactions are left out.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_bar_chart(
    filter: MonthFilter,
    connection: &Connection,
) -> Result<Vec<PriceRangeCount>, Error> {
    let mut counts = connection
        .prepare(&format!(
            "SELECT \
                CASE WHEN price >= 0 AND price < :limit \
                    THEN CAST(price / :width AS INTEGER) * :width \
                END AS lower_bound, \
                COUNT(*) \
            FROM \"transaction\" WHERE {MONTH_PREDICATE} \
            GROUP BY lower_bound"
        ))?
        .query_map(
            named_params! {
                ":month": filter.ordinal(),
                ":limit": PRICE_RANGE_LIMIT,
                ":width": PRICE_RANGE_WIDTH,
            },
            |row| {
                let bucket_lower_bound = match row.get::<_, Option<u32>>(0)? {
                    Some(lower_bound) => PriceRange::From(lower_bound),
                    None => PriceRange::Overflow,
                };

                Ok(PriceRangeCount {
                    bucket_lower_bound,
                    count: row.get(1)?,
                })
            },
        )?
        .map(|count_result| count_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    counts.sort_by_key(|count| count.bucket_lower_bound);

    Ok(counts)
}

/// Get the price range histogram for a month.
pub async fn get_bar_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let filter = MonthFilter::from(&query);

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_bar_chart(filter, &connection));

    match result {
        Ok(bar_chart) => Json(bar_chart).into_response(),
        Err(error) => error.into_json_response("Error fetching bar chart data"),
    }
}
