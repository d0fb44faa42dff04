//! The statistics, bar chart and pie chart for a month in a single response.
use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    Error,
    db::{ReportState, lock_connection},
};

use super::{
    bar_chart::{PriceRangeCount, get_bar_chart},
    month::{MonthFilter, MonthQuery},
    pie_chart::{CategoryCounts, get_pie_chart},
    statistics::{Statistics, get_statistics},
};

/// Every report for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// See [get_statistics].
    pub statistics: Statistics,
    /// See [get_bar_chart].
    pub bar_chart: Vec<PriceRangeCount>,
    /// See [get_pie_chart].
    pub pie_chart: CategoryCounts,
}

/// Run each report for the month selected by `filter`.
///
/// The reports are independent queries, so they are not guaranteed to see the
/// same snapshot of the data.
///
/// # Errors
/// Returns [Error::SqlError] if any of the queries fail.
pub fn get_combined(filter: MonthFilter, connection: &Connection) -> Result<CombinedReport, Error> {
    Ok(CombinedReport {
        statistics: get_statistics(filter, connection)?,
        bar_chart: get_bar_chart(filter, connection)?,
        pie_chart: get_pie_chart(filter, connection)?,
    })
}

/// Get every report for a month.
pub async fn get_combined_endpoint(
    State(state): State<ReportState>,
    Query(query): Query<MonthQuery>,
) -> Response {
    let filter = MonthFilter::from(&query);

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_combined(filter, &connection));

    match result {
        Ok(report) => Json(report).into_response(),
        Err(error) => error.into_json_response("Error fetching combined data"),
    }
}
