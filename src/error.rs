//! Defines the app level error type and its conversion to JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an invalid email and password combination.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The email used to register is already in use.
    ///
    /// The client should try again with a different email address.
    #[error("the email is already registered")]
    DuplicateEmail,

    /// The string used to register is not a valid email address.
    #[error("\"{0}\" is not a valid email address")]
    InvalidEmail(String),

    /// The password used to register does not meet the minimum length.
    #[error("the password must be at least {0} characters long")]
    PasswordTooShort(usize),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// The application client should only see a general internal server
    /// error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A report was requested for a quarter outside of 1-4.
    #[error("{0} is not a valid quarter, expected a number between 1 and 4")]
    InvalidQuarter(u8),

    /// A report was requested for a nonsensical year.
    #[error("{0} is not a valid year")]
    InvalidYear(i32),

    /// The store collaborator failed while fetching data for a report.
    ///
    /// The aggregator surfaces this on the first failed month interval and
    /// does not attempt the remaining intervals.
    #[error("failed to fetch report data from the store: {0}")]
    UpstreamFetch(Box<Error>),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// parameters (e.g., ID) are correct and that the resource has been
    /// created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLock,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Error::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
            Error::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
            Error::InvalidEmail(_)
            | Error::PasswordTooShort(_)
            | Error::InvalidQuarter(_)
            | Error::InvalidYear(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            // Any errors that are not handled above are not intended to be
            // shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
