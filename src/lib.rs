//! Sage Ledger is the backend for a small accounting ledger.
//!
//! This library provides a JSON API for creating and listing accounts from a
//! chart of accounts and the bank accounts that hold a business's money.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod bank_account;
mod database_id;
mod db;
mod endpoints;
mod logging;
mod not_found;
mod params;
mod response;
mod routing;
mod timezone;

pub use account::AccountType;
pub use app_state::AppState;
pub use db::{Database, DEFAULT_STORAGE_TIMEOUT, initialize as initialize_db};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use response::{CreatedResponse, MessageResponse};
pub use routing::{build_cors_layer, build_router};
pub use timezone::get_local_offset;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required text field was provided but contained only whitespace.
    ///
    /// The field name is the name of the query parameter, e.g. "name".
    #[error("{0} is required!")]
    EmptyField(&'static str),

    /// The account type is not one of the fixed account categories.
    #[error("\"{0}\" is not a valid account type!")]
    InvalidAccountType(String),

    /// A numeric field could not be parsed as a finite number.
    #[error("{field} must be a number, got \"{value}\"!")]
    InvalidNumber {
        /// The name of the query parameter.
        field: &'static str,
        /// The raw value the client sent.
        value: String,
    },

    /// A date field could not be parsed.
    ///
    /// Dates are accepted as "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DDTHH:MM:SS" or
    /// "YYYY-MM-DD".
    #[error("{field} must be a date like \"2024-01-31 09:30:00\", got \"{value}\"!")]
    InvalidDate {
        /// The name of the query parameter.
        field: &'static str,
        /// The raw value the client sent.
        value: String,
    },

    /// The query string could not be decoded into the endpoint's parameters.
    #[error("{0}")]
    InvalidQuery(String),

    /// The route exists but does not accept the request method.
    #[error("Method not allowed!")]
    MethodNotAllowed,

    /// An account with the same name, type and balance already exists.
    #[error("Account already exists!")]
    DuplicateAccount,

    /// A bank account with the same name, account number, bank name and
    /// opening balance already exists.
    #[error("Bank account already exists!")]
    DuplicateBankAccount,

    /// A different bank account already uses the account number.
    #[error("A bank account with this account number already exists!")]
    DuplicateAccountNumber,

    /// The account ID query parameter was missing or blank.
    #[error("Account ID is required!")]
    MissingAccountId,

    /// No account matched the requested ID.
    #[error("Account not found!")]
    AccountNotFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The database did not respond within the configured storage timeout.
    #[error("the database did not respond in time")]
    StorageTimeout,

    /// The blocking task running a database call panicked or was cancelled.
    #[error("the database task failed: {0}")]
    StorageTaskFailed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// A timestamp could not be formatted for display.
    #[error("could not format timestamp: {0}")]
    TimestampFormatError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::InvalidQuery(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyField(_)
            | Error::InvalidAccountType(_)
            | Error::InvalidNumber { .. }
            | Error::InvalidDate { .. }
            | Error::InvalidQuery(_)
            | Error::DuplicateAccount
            | Error::DuplicateBankAccount
            | Error::DuplicateAccountNumber
            | Error::MissingAccountId => StatusCode::BAD_REQUEST,
            Error::AccountNotFound | Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::StorageTimeout => StatusCode::GATEWAY_TIMEOUT,
            Error::StorageTaskFailed(_)
            | Error::SqlError(_)
            | Error::InvalidTimezoneError(_)
            | Error::TimestampFormatError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::NotFound => "Not found!".to_owned(),
            Error::StorageTimeout => {
                tracing::warn!("A database call exceeded the storage timeout");
                "The database took too long to respond, try again later.".to_owned()
            }
            // Server-side failures are not intended to be shown to the client.
            error if status.is_server_error() => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Something went wrong, check the server logs for more details.".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}
