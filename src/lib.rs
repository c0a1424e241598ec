//! Spending Analysis is a web backend for recording personal spending and
//! serving summary statistics over it.
//!
//! This library provides a JSON REST API over a transactions table, three
//! name-keyed lookup tables (category, type, source), and read-only
//! statistics endpoints that aggregate spending by category, source, or
//! date bucket.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod db;
mod endpoints;
mod logging;
mod lookup;
mod routing;
mod statistics;
mod transaction;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

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
    /// A date query parameter could not be parsed as a calendar date.
    ///
    /// Dates in query parameters must use the format `YYYY-MM-DD`.
    #[error("could not parse '{parameter}' value \"{value}\" as a date, expected YYYY-MM-DD")]
    InvalidDateParameter {
        /// The name of the query parameter that failed to parse.
        parameter: &'static str,
        /// The value that was supplied for the parameter.
        value: String,
    },

    /// The `by` query parameter for date-bucketed statistics was missing or
    /// not one of the recognized granularities.
    #[error("'by' is a required query parameter. It can be one of [year, month, day, quarter].")]
    InvalidGranularity,

    /// An empty or whitespace-only string was used as a lookup entry name.
    #[error("{0} name cannot be empty")]
    EmptyLookupName(&'static str),

    /// The requested resource was not found.
    ///
    /// The client should check that the parameters (e.g., ID) are correct
    /// and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist.
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist.
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to update or delete a lookup entry (category/type/source) that
    /// does not exist. Holds the lookup kind label and the entry name.
    #[error("no {0} named \"{1}\" exists in the database")]
    MissingLookup(&'static str, String),

    /// Tried to create a lookup entry whose name already exists.
    #[error("a {0} named \"{1}\" already exists in the database")]
    DuplicateLookup(&'static str, String),

    /// A uniqueness constraint was violated on a write.
    #[error("a uniqueness constraint was violated: {0}")]
    UniqueConstraint(String),

    /// A write violated referential integrity between the transactions
    /// table and the lookup tables, e.g. inserting a transaction that
    /// references a nonexistent category, or deleting a category that is
    /// still referenced by a transaction.
    #[error(
        "the change violates referential integrity between transactions and the lookup tables"
    )]
    ForeignKeyConstraint,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(sql_error, _)
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
            {
                Error::ForeignKeyConstraint
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || sql_error.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Error::UniqueConstraint(desc.clone())
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
        let status = match self {
            Error::InvalidDateParameter { .. }
            | Error::InvalidGranularity
            | Error::EmptyLookupName(_) => StatusCode::BAD_REQUEST,
            Error::NotFound
            | Error::UpdateMissingTransaction
            | Error::DeleteMissingTransaction
            | Error::MissingLookup(..) => StatusCode::NOT_FOUND,
            Error::DuplicateLookup(..)
            | Error::UniqueConstraint(_)
            | Error::ForeignKeyConstraint => StatusCode::CONFLICT,
            Error::DatabaseLockError | Error::SqlError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
