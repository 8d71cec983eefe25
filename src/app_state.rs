//! Implements a struct that holds the state of the REST server.

use std::time::Duration;

use rusqlite::Connection;

use crate::{Error, db::Database, db::initialize, timezone::get_local_offset};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    ///
    /// Timestamps are stored in UTC and converted to this timezone for clients.
    pub local_timezone: String,

    /// The handle to the application database.
    pub database: Database,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    /// Database calls that take longer than `storage_timeout` fail.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or `local_timezone` is not a
    /// known timezone.
    pub fn new(
        db_connection: Connection,
        local_timezone: &str,
        storage_timeout: Duration,
    ) -> Result<Self, Error> {
        if get_local_offset(local_timezone).is_none() {
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        }

        initialize(&db_connection)?;

        Ok(Self {
            local_timezone: local_timezone.to_owned(),
            database: Database::new(db_connection, storage_timeout),
        })
    }
}
