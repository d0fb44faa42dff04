//! Defines the route handler and query for listing a month's transactions one page at a time.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, named_params};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    db::lock_connection,
    pagination::{Page, PaginationConfig},
};

use super::{
    core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row},
    month::{MONTH_PREDICATE, MonthFilter},
};

/// Matches rows containing the search term in the title or description, or
/// whose price equals the search term read as a number.
///
/// Binding `NULL` to `:pattern` disables the search.
const SEARCH_PREDICATE: &str = "(:pattern IS NULL \
    OR title LIKE :pattern ESCAPE '\\' \
    OR description LIKE :pattern ESCAPE '\\' \
    OR price = :price)";

/// The query parameters for the transaction listing.
///
/// The page parameters are kept as text so that malformed values fall back to
/// the defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// The full English name of the month, e.g. "March".
    pub month: Option<String>,
    /// Text to look for in the title, description or price.
    pub search: Option<String>,
    /// The one-based page number.
    pub page: Option<String>,
    /// The maximum number of transactions per page.
    pub per_page: Option<String>,
}

/// A search term prepared for [SEARCH_PREDICATE].
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    /// A `LIKE` pattern matching any text containing the search term.
    pattern: String,
    /// The search term read as a number, or zero if it is not a number.
    price: f64,
}

impl Search {
    /// Prepare `term` for searching, or `None` if there is nothing to search for.
    pub fn new(term: Option<&str>) -> Option<Self> {
        let term = term.filter(|term| !term.is_empty())?;

        Some(Self {
            pattern: format!("%{}%", escape_like(term)),
            price: parse_price(term),
        })
    }
}

/// Escape the `LIKE` wildcards in `term` so it is matched literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

/// Read the search term as a price, treating anything that is not a finite number as zero.
///
/// Note that this means a non-numeric search also matches free items.
fn parse_price(term: &str) -> f64 {
    match term.trim().parse::<f64>() {
        Ok(price) if price.is_finite() => price,
        _ => 0.0,
    }
}

/// One page of a month's transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The number of transactions matching the query across all pages.
    pub total: u64,
    /// The one-based page number.
    pub page: u64,
    /// The maximum number of transactions per page.
    pub per_page: u64,
    /// The number of pages needed to show all matching transactions.
    pub total_pages: u64,
    /// The transactions on this page, ordered by ID.
    pub transactions: Vec<Transaction>,
}

/// Get one page of the transactions sold in the month selected by `filter`,
/// optionally narrowed down by `search`.
///
/// # Errors
/// Returns [Error::SqlError] if:
/// - SQL query preparation or execution fails
/// - Transaction row mapping fails
pub fn get_transactions(
    filter: MonthFilter,
    search: Option<&Search>,
    page: Page,
    connection: &Connection,
) -> Result<TransactionPage, Error> {
    let month = filter.ordinal();
    let pattern = search.map(|search| search.pattern.as_str());
    let price = search.map(|search| search.price);

    let total: u64 = connection.query_row(
        &format!(
            "SELECT COUNT(*) FROM \"transaction\" WHERE {MONTH_PREDICATE} AND {SEARCH_PREDICATE}"
        ),
        named_params! { ":month": month, ":pattern": pattern, ":price": price },
        |row| row.get(0),
    )?;

    let limit = i64::try_from(page.size()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

    // Order by ID so that pages do not overlap.
    let transactions = connection
        .prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" \
            WHERE {MONTH_PREDICATE} AND {SEARCH_PREDICATE} \
            ORDER BY id ASC LIMIT :limit OFFSET :offset"
        ))?
        .query_map(
            named_params! {
                ":month": month,
                ":pattern": pattern,
                ":price": price,
                ":limit": limit,
                ":offset": offset,
            },
            map_transaction_row,
        )?
        .map(|transaction_result| transaction_result.map_err(Error::SqlError))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionPage {
        total,
        page: page.number(),
        per_page: page.size(),
        total_pages: page.page_count(total),
        transactions,
    })
}

/// The state needed for listing transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The database connection for querying transactions.
    db_connection: Arc<Mutex<Connection>>,
    /// The config that controls the default page and page size.
    pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// List a month's transactions one page at a time.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let filter = MonthFilter::from_name(query.month.as_deref());
    let search = Search::new(query.search.as_deref());
    let page = Page::from_params(
        query.page.as_deref(),
        query.per_page.as_deref(),
        &state.pagination_config,
    );

    let result = lock_connection(&state.db_connection)
        .and_then(|connection| get_transactions(filter, search.as_ref(), page, &connection));

    match result {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_json_response("Error fetching transactions"),
    }
}
