//! The API endpoints URIs.
//!
//! Every endpoint lives under [BASE].

/// The base path shared by all transaction endpoints.
pub const BASE: &str = "/api/transactions";
/// The route for replacing the stored transactions with the remote dataset.
pub const INIT: &str = "/api/transactions/init";
/// The route for listing a month's transactions, one page at a time.
pub const TRANSACTIONS: &str = "/api/transactions";
/// [TRANSACTIONS] with a trailing slash.
pub const TRANSACTIONS_SLASH: &str = "/api/transactions/";
/// The route for a month's sales totals.
pub const STATISTICS: &str = "/api/transactions/statistics";
/// The route for a month's price range histogram.
pub const BAR_CHART: &str = "/api/transactions/barchart";
/// The route for a month's transaction count per category.
pub const PIE_CHART: &str = "/api/transactions/piechart";
/// The route for the statistics, bar chart and pie chart in one response.
pub const COMBINED: &str = "/api/transactions/combined";
