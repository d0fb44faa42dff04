//! The number of a month's transactions in each category.
use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};

use crate::{
    Error,
    db::{ReportState, lock_connection},
};

use super::month::{MONTH_PREDICATE, MonthFilter, MonthQuery};

/// Transaction counts keyed by category name.
pub type CategoryCounts = BTreeMap<String, u64>;

/// Count the transactions in each category for the month selected by `filter`.
///
/// Only categories with at least one transaction in the month appear.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn get_pie_chart(filter: MonthFilter, connection: &Connection) -> Result<CategoryCounts, Error> {
    connection
        .prepare(&format!(
            "SELECT category, COUNT(*) FROM \"transaction\" \
            WHERE {MONTH_PREDICATE} GROUP BY category"
        ))?
        .query_map(named_params! { ":month": filter.ordinal() }, |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .map(|count_result| count_result.map_err(Error::SqlError))
        .collect()
}

/// Get the number of transactions per category for a month.
pub async fn get_pie_chart_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let filter = MonthFilter::from(&query);

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_pie_chart(filter, &connection));

    match result {
        Ok(pie_chart) => Json(pie_chart).into_response(),
        Err(error) => error.into_json_response("Error fetching pie chart data"),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        test_utils::{get_test_connection, seed},
        transaction::{MonthFilter, NewTransaction},
    };

    use super::get_pie_chart;

    #[test]
    fn counts_each_category() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![
                NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC))
                    .category("Electronics"),
                NewTransaction::build("Drive", 250.0, datetime!(2021-03-11 12:00 UTC))
                    .category("Electronics"),
                NewTransaction::build("Ring", 50.0, datetime!(2022-03-12 12:00 UTC))
                    .category("jewelery"),
                NewTransaction::build("Shirt", 20.0, datetime!(2022-04-12 12:00 UTC))
                    .category("men's clothing"),
            ],
        );

        let got = get_pie_chart(MonthFilter::from_name(Some("March")), &conn).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got["Electronics"], 2);
        assert_eq!(got["jewelery"], 1);
        assert!(!got.contains_key("men's clothing"));
    }

    #[test]
    fn categories_are_not_normalized() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![
                NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC))
                    .category("Electronics"),
                NewTransaction::build("Drive", 250.0, datetime!(2022-03-11 12:00 UTC))
                    .category("electronics"),
            ],
        );

        let got = get_pie_chart(MonthFilter::from_name(Some("March")), &conn).unwrap();

        assert_eq!(got.len(), 2);
    }

    #[test]
    fn empty_month_has_no_categories() {
        let conn = get_test_connection();
        seed(
            &conn,
            vec![
                NewTransaction::build("Phone", 150.0, datetime!(2022-03-10 12:00 UTC))
                    .category("Electronics"),
            ],
        );

        let got = get_pie_chart(MonthFilter::from_name(Some("October")), &conn).unwrap();

        assert!(got.is_empty());
    }
}
