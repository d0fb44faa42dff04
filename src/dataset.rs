//! Loads the product transaction dataset from a remote URL into the database.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Serialize;

use crate::{
    AppState, Error,
    db::lock_connection,
    transaction::{NewTransaction, replace_all_transactions},
};

/// Where the product transaction dataset is downloaded from by default.
pub const DEFAULT_DATASET_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";

/// The state needed for loading the dataset.
#[derive(Debug, Clone)]
pub struct DatasetState {
    /// The database connection the dataset is written to.
    db_connection: Arc<Mutex<Connection>>,
    /// The client used to download the dataset.
    http_client: reqwest::Client,
    /// Where the dataset is downloaded from.
    dataset_url: String,
}

impl FromRef<AppState> for DatasetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            http_client: state.http_client.clone(),
            dataset_url: state.dataset_url.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct InitializedBody {
    message: &'static str,
}

/// Download the dataset and replace every stored transaction with it.
pub async fn initialize_dataset_endpoint(State(state): State<DatasetState>) -> Response {
    match initialize_dataset(&state).await {
        Ok(count) => {
            tracing::info!("Loaded {count} transactions from {}", state.dataset_url);

            Json(InitializedBody {
                message: "Database initialized successfully!",
            })
            .into_response()
        }
        Err(error) => error.into_json_response("Error initializing database"),
    }
}

async fn initialize_dataset(state: &DatasetState) -> Result<usize, Error> {
    let transactions = fetch_dataset(&state.http_client, &state.dataset_url).await?;

    // The lock is only taken once the download has finished.
    let connection = lock_connection(&state.db_connection)?;
    replace_all_transactions(&transactions, &connection)
}

/// Download the dataset at `url`.
///
/// # Errors
/// This function will return a:
/// - [Error::DatasetFetch] if the request fails or the server responds with an error status,
/// - or [Error::InvalidDataset] if the body is not a JSON array of transactions.
pub async fn fetch_dataset(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<NewTransaction>, Error> {
    tracing::info!("Fetching dataset from {url}");

    let transactions = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<NewTransaction>>()
        .await?;

    tracing::debug!("Fetched {} transactions", transactions.len());

    Ok(transactions)
}
