//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row, Transaction as SqlTransaction, types::Type};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset, format_description::well_known::Rfc3339};

use crate::{Error, database_id::TransactionId};

// ============================================================================
// MODELS
// ============================================================================

/// A product listing and whether it sold, as stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    pub id: TransactionId,
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// A free-form label such as "electronics" or "men's clothing".
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was listed for sale, normalized to UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URL pointing to an image of the product.
    pub image: Option<String>,
}

/// A transaction that has not been stored yet.
///
/// This is the shape of each record in the remote dataset. Any `id` field in
/// the dataset is ignored since the database assigns its own IDs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The name of the product.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price of the product.
    pub price: f64,
    /// A free-form label such as "electronics" or "men's clothing".
    pub category: String,
    /// Whether the product was sold.
    pub sold: bool,
    /// When the product was listed for sale.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URL pointing to an image of the product.
    #[serde(default)]
    pub image: Option<String>,
}

impl NewTransaction {
    /// Create an unsold transaction with an empty description in the "other" category.
    pub fn build(title: &str, price: f64, date_of_sale: OffsetDateTime) -> Self {
        Self {
            title: title.to_owned(),
            description: String::new(),
            price,
            category: "other".to_owned(),
            sold: false,
            date_of_sale,
            image: None,
        }
    }

    /// Set the description of the transaction.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the transaction was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns of the transaction table in the order [map_transaction_row] expects.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Replace every transaction in the database with `transactions`.
///
/// The delete and inserts happen in a single database transaction, so on
/// error the previously stored transactions are left untouched.
///
/// Returns the number of transactions inserted.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidDate] if a sale date cannot be formatted,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn replace_all_transactions(
    transactions: &[NewTransaction],
    connection: &Connection,
) -> Result<usize, Error> {
    let sql_transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Immediate)?;

    let deleted = sql_transaction.execute("DELETE FROM \"transaction\"", ())?;
    tracing::debug!("Deleted {deleted} transactions");

    {
        let mut statement = sql_transaction.prepare(
            "INSERT INTO \"transaction\" (title, description, price, category, sold, date_of_sale, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;

        for transaction in transactions {
            statement.execute((
                &transaction.title,
                &transaction.description,
                transaction.price,
                &transaction.category,
                transaction.sold,
                format_sale_date(transaction.date_of_sale)?,
                &transaction.image,
            ))?;
        }
    }

    sql_transaction.commit()?;

    Ok(transactions.len())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                date_of_sale TEXT NOT NULL,
                image TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Format a sale date the way it is stored: RFC 3339 in UTC.
///
/// Storing UTC means the month seen by SQLite's `strftime` is the UTC month.
fn format_sale_date(date_of_sale: OffsetDateTime) -> Result<String, Error> {
    date_of_sale
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|error| Error::InvalidDate(format!("{date_of_sale}: {error}")))
}

/// Map a database row to a Transaction.
///
/// The row must contain [TRANSACTION_COLUMNS] in order.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let title = row.get(1)?;
    let description = row.get(2)?;
    let price = row.get(3)?;
    let category = row.get(4)?;
    let sold = row.get(5)?;
    let raw_date: String = row.get(6)?;
    let date_of_sale = OffsetDateTime::parse(&raw_date, &Rfc3339).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(error))
    })?;
    let image = row.get(7)?;

    Ok(Transaction {
        id,
        title,
        description,
        price,
        category,
        sold,
        date_of_sale,
        image,
    })
}

// ============================================================================
// TESTS
// ============================================================================
