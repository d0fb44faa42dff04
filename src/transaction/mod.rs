//! Transactions and the reports built from them.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the database functions for storing them
//! - The month filter shared by every report
//! - The listing, statistics, bar chart, pie chart and combined reports,
//!   along with their route handlers

mod bar_chart;
mod combined;
mod core;
mod listing;
mod month;
mod pie_chart;
mod statistics;

pub use bar_chart::{
    OVERFLOW_LABEL, PRICE_RANGE_LIMIT, PRICE_RANGE_WIDTH, PriceRange, PriceRangeCount,
    get_bar_chart, get_bar_chart_endpoint,
};
pub use combined::{CombinedReport, get_combined, get_combined_endpoint};
pub use self::core::{
    NewTransaction, Transaction, create_transaction_table, map_transaction_row,
    replace_all_transactions,
};
pub use listing::{
    Search, TransactionPage, TransactionsQuery, get_transactions, get_transactions_endpoint,
};
pub use month::{MonthFilter, MonthQuery};
pub use pie_chart::{CategoryCounts, get_pie_chart, get_pie_chart_endpoint};
pub use statistics::{Statistics, get_statistics, get_statistics_endpoint};

#[cfg(test)]
pub use self::core::count_transactions;
