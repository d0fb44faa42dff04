//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// The remote dataset could not be fetched, e.g. the host was unreachable
    /// or it responded with a non-success status code.
    #[error("could not fetch the dataset: {0}")]
    DatasetFetch(String),

    /// The remote dataset was fetched but its body is not a JSON array of
    /// transactions.
    #[error("the dataset is malformed: {0}")]
    InvalidDataset(String),

    /// A sale date could not be converted to or from its stored RFC 3339 form.
    #[error("invalid sale date \"{0}\"")]
    InvalidDate(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", value);
        Error::SqlError(value)
    }
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            Error::InvalidDataset(value.to_string())
        } else {
            Error::DatasetFetch(value.to_string())
        }
    }
}

/// The JSON body sent to the client when a request fails.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody<'a> {
    /// A human readable summary of what the server was trying to do.
    pub message: &'a str,
    /// The underlying cause.
    pub error: String,
}

impl Error {
    /// Convert the error into a 500 response whose body pairs `message` with
    /// the error's description.
    pub(crate) fn into_json_response(self, message: &str) -> Response {
        tracing::error!("{message}: {self}");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                message,
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        self.into_json_response("Something went wrong")
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn sql_errors_are_wrapped() {
        let error: Error = rusqlite::Error::InvalidQuery.into();

        assert!(matches!(error, Error::SqlError(rusqlite::Error::InvalidQuery)));
    }

    #[tokio::test]
    async fn json_response_has_message_and_error() {
        let response = Error::DatasetFetch("connection refused".to_owned())
            .into_json_response("Error initializing database");

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(body["message"], "Error initializing database");
        assert_eq!(
            body["error"],
            "could not fetch the dataset: connection refused"
        );
    }

    #[test]
    fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
