//! The application's database handle and schema initialization.

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, account::create_account_table, bank_account::create_bank_account_table};

/// How long a database call may take before it fails with [Error::StorageTimeout].
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// A shared handle to the application's SQLite database.
///
/// Every call made through [Database::run] executes on tokio's blocking
/// thread pool and is bounded by the handle's timeout.
#[derive(Debug, Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
    timeout: Duration,
}

impl Database {
    /// Wrap `connection` in a handle whose calls time out after `timeout`.
    ///
    /// The caller is responsible for calling [initialize] on `connection` first.
    pub fn new(connection: Connection, timeout: Duration) -> Self {
        Self {
            connection: Arc::new(Mutex::new(connection)),
            timeout,
        }
    }

    /// Run `operation` with exclusive access to the database connection.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::StorageTimeout] if `operation` does not finish within the timeout.
    ///   The operation keeps running in the background and holds the connection until it finishes.
    /// - [Error::DatabaseLockError] if an earlier operation panicked while holding the connection.
    /// - [Error::StorageTaskFailed] if `operation` panicked.
    /// - Any error returned by `operation`.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, Error>
    where
        F: FnOnce(&Connection) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();

        let task = tokio::task::spawn_blocking(move || {
            let connection = connection.lock().map_err(|error| {
                tracing::error!("could not acquire database lock: {error}");
                Error::DatabaseLockError
            })?;

            operation(&connection)
        });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => {
                tracing::error!("database task failed: {join_error}");
                Err(Error::StorageTaskFailed(join_error.to_string()))
            }
            Err(_) => {
                tracing::warn!("database call exceeded the timeout of {:?}", self.timeout);
                Err(Error::StorageTimeout)
            }
        }
    }
}

/// Create the tables for the domain models if they do not exist.
///
/// # Errors
/// Returns an error if a table could not be created, in which case no tables are created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_account_table(&transaction)?;
    create_bank_account_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Create an initialized in-memory database for tests.
#[cfg(test)]
pub(crate) fn get_test_database() -> Database {
    let connection =
        Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    Database::new(connection, DEFAULT_STORAGE_TIMEOUT)
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn sql_is_valid() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        assert_eq!(Ok(()), initialize(&connection));
    }

    #[test]
    fn can_initialize_twice() {
        let connection =
            Connection::open_in_memory().expect("Could not initialise in-memory SQLite database");

        initialize(&connection).expect("Could not initialize database");

        assert_eq!(Ok(()), initialize(&connection));
    }
}

#[cfg(test)]
mod database_run_tests {
    use std::time::Duration;

    use rusqlite::Connection;

    use crate::Error;

    use super::{Database, get_test_database};

    #[tokio::test]
    async fn returns_operation_result() {
        let database = get_test_database();

        let got = database
            .run(|connection| {
                connection
                    .query_row("SELECT 40 + 2", [], |row| row.get::<_, i64>(0))
                    .map_err(Error::from)
            })
            .await;

        assert_eq!(got, Ok(42));
    }

    #[tokio::test]
    async fn propagates_operation_error() {
        let database = get_test_database();

        let got: Result<(), Error> = database.run(|_| Err(Error::DuplicateAccount)).await;

        assert_eq!(got, Err(Error::DuplicateAccount));
    }

    #[tokio::test]
    async fn slow_operation_times_out() {
        let connection = Connection::open_in_memory().unwrap();
        let database = Database::new(connection, Duration::from_millis(10));

        let got = database
            .run(|_| {
                std::thread::sleep(Duration::from_millis(250));
                Ok(())
            })
            .await;

        assert_eq!(got, Err(Error::StorageTimeout));
    }

    #[tokio::test]
    async fn panicking_operation_fails_task() {
        let database = get_test_database();

        let got: Result<(), Error> = database.run(|_| panic!("oh no")).await;

        assert!(
            matches!(got, Err(Error::StorageTaskFailed(_))),
            "want Err(StorageTaskFailed), got {got:?}"
        );
    }
}
