use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::Value;
use tokio::net::TcpListener;

/// The path the test dataset is served from.
pub(crate) const DATASET_PATH: &str = "/product_transaction.json";

/// Serve `body` as JSON from a local HTTP server and return the dataset URL.
///
/// Any other path responds with 404 Not Found.
pub(crate) async fn serve_dataset(body: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Could not bind dataset server.");
    let address = listener.local_addr().expect("Could not get dataset server address.");

    let app = Router::new()
        .route(
            DATASET_PATH,
            get(move || {
                let body = body.clone();
                async move { Json(body) }
            }),
        )
        .fallback(|| async { StatusCode::NOT_FOUND });

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Dataset server stopped unexpectedly.");
    });

    format!("http://{address}{DATASET_PATH}")
}

/// A small dataset in the shape of the remote product transactions.
///
/// Two records are in March, one sold for 150 and one unsold for 250, both in
/// the "Electronics" category. The third is in April.
pub(crate) fn march_dataset() -> Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Phone",
            "price": 150,
            "description": "A smart phone",
            "category": "Electronics",
            "image": "https://example.com/phone.jpg",
            "sold": true,
            "dateOfSale": "2021-03-27T20:29:54+05:30"
        },
        {
            "id": 2,
            "title": "Hard Drive",
            "price": 250,
            "description": "2TB of storage",
            "category": "Electronics",
            "image": "https://example.com/drive.jpg",
            "sold": false,
            "dateOfSale": "2022-03-10T09:00:00+05:30"
        },
        {
            "id": 3,
            "title": "Backpack",
            "price": 109.95,
            "description": "Fits 15 inch laptops",
            "category": "men's clothing",
            "image": "https://example.com/backpack.jpg",
            "sold": true,
            "dateOfSale": "2022-04-10T09:00:00+05:30"
        }
    ])
}
