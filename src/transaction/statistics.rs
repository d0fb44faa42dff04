//! Sales totals for a month.
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::Serialize;

use crate::{
    Error,
    db::{ReportState, lock_connection},
};

use super::month::{MONTH_PREDICATE, MonthFilter, MonthQuery};

/// How much sold in a month and how many items did and did not sell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of the sold items.
    pub total_sale_amount: f64,
    /// The number of items that sold.
    pub total_sold_items: u64,
    /// The number of items that did not sell.
    pub total_unsold_items: u64,
}

/// Compute the sales totals for the month selected by `filter`.
///
/// A month without transactions yields all zeroes.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_statistics(filter: MonthFilter, connection: &Connection) -> Result<Statistics, Error> {
    connection
        .query_row(
            &format!(
                "SELECT \
                    COALESCE(SUM(CASE WHEN sold THEN price ELSE 0.0 END), 0.0), \
                    COUNT(CASE WHEN sold THEN 1 END), \
                    COUNT(CASE WHEN NOT sold THEN 1 END) \
                FROM \"transaction\" WHERE {MONTH_PREDICATE}"
            ),
            named_params! { ":month": filter.ordinal() },
            |row| {
                Ok(Statistics {
                    total_sale_amount: row.get(0)?,
                    total_sold_items: row.get(1)?,
                    total_unsold_items: row.get(2)?,
                })
            },
        )
        .map_err(|error| error.into())
}

/// Get the sales totals for a month.
pub async fn get_statistics_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let filter = MonthFilter::from(&query);

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_statistics(filter, &connection));

    match result {
        Ok(statistics) => Json(statistics).into_response(),
        Err(error) => error.into_json_response("Error fetching statistics"),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        test_utils::{get_test_connection, seed},
        transaction::{MonthFilter, NewTransaction},
    };

    use super::{Statistics, get_statistics};

    #[test]
    fn sums_sold_and_counts_both() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![
                NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC)).sold(true),
                NewTransaction::build("Shirt", 250.0, datetime!(2021-03-11 12:00 UTC)),
                NewTransaction::build("Ring", 50.0, datetime!(2022-04-11 12:00 UTC)).sold(true),
            ],
        );

        let got = get_statistics(MonthFilter::from_name(Some("March")), &conn).unwrap();

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 150.0,
                total_sold_items: 1,
                total_unsold_items: 1,
            }
        );
    }

    #[test]
    fn empty_month_is_all_zeroes() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC)).sold(true)],
        );

        let got = get_statistics(MonthFilter::from_name(Some("July")), &conn).unwrap();

        assert_eq!(got, Statistics::default());
    }

    #[test]
    fn invalid_month_is_all_zeroes() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC)).sold(true)],
        );

        let got = get_statistics(MonthFilter::from_name(Some("march")), &conn).unwrap();

        assert_eq!(got, Statistics::default());
    }

    #[test]
    fn sold_and_unsold_add_up_to_month_count() {
        let conn = get_test_connection();
        let transactions = (0..12)
            .map(|i| {
                NewTransaction::build("Item", 10.0 * i as f64, datetime!(2022-06-10 12:00 UTC))
                    .sold(i % 3 == 0)
            })
            .collect();
        seed(&conn, transactions);

        let got = get_statistics(MonthFilter::from_name(Some("June")), &conn).unwrap();

        assert_eq!(got.total_sold_items + got.total_unsold_items, 12);
        assert_eq!(got.total_sold_items, 4);
        assert_eq!(got.total_sale_amount, 0.0 + 30.0 + 60.0 + 90.0);
    }
}
