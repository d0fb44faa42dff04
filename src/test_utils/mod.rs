#![allow(missing_docs)]

pub(crate) mod dataset;

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    AppState, build_router, initialize_db,
    pagination::PaginationConfig,
    transaction::{NewTransaction, replace_all_transactions},
};

pub(crate) use dataset::serve_dataset;

/// An initialized in-memory database.
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize_db(&conn).unwrap();
    conn
}

/// Replace the contents of the database with `transactions`.
#[track_caller]
pub(crate) fn seed(connection: &Connection, transactions: Vec<NewTransaction>) {
    replace_all_transactions(&transactions, connection).expect("Could not seed transactions");
}

/// App state backed by an in-memory database that loads its dataset from `dataset_url`.
pub(crate) fn get_test_state(dataset_url: &str) -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, dataset_url, PaginationConfig::default())
        .expect("Could not create app state.")
}

/// A test server for the full router along with its state.
pub(crate) fn get_test_server(dataset_url: &str) -> (AppState, TestServer) {
    let state = get_test_state(dataset_url);
    let server = TestServer::new(build_router(state.clone()));

    (state, server)
}

/// Seed the database behind `state`.
#[track_caller]
pub(crate) fn seed_state(state: &AppState, transactions: Vec<NewTransaction>) {
    seed(&state.db_connection.lock().unwrap(), transactions);
}
