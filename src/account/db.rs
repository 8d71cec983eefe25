//! Database operations for accounts.

use rusqlite::{Connection, Row, params};
use time::OffsetDateTime;

use crate::{
    Error,
    account::{Account, AccountId, NewAccount},
};

/// Insert an account unless one with the same name, type and balance exists.
///
/// The duplicate check is enforced by a unique index, so concurrent creates with
/// identical fields produce exactly one account.
///
/// # Errors
/// Returns [Error::DuplicateAccount] if a matching account already exists.
pub fn create_account(
    new_account: &NewAccount,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .execute(
            "INSERT INTO account (name, account_type, balance, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)",
            params![
                new_account.name,
                new_account.account_type,
                new_account.balance,
                now
            ],
        )
        .map_err(|error| match error {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 2067 => {
                Error::DuplicateAccount
            }
            error => error.into(),
        })?;

    let id = connection.last_insert_rowid();

    Ok(Account {
        id,
        name: new_account.name.clone(),
        account_type: new_account.account_type,
        balance: new_account.balance,
        created_at: now,
        updated_at: now,
    })
}

/// Retrieve a single account by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no account with `account_id`.
pub fn get_account(account_id: AccountId, connection: &Connection) -> Result<Account, Error> {
    connection
        .prepare(
            "SELECT id, name, account_type, balance, created_at, updated_at
            FROM account WHERE id = :id;",
        )?
        .query_row(&[(":id", &account_id)], map_row_to_account)
        .map_err(|error| error.into())
}

/// Retrieve all accounts in the order they were created.
pub fn get_all_accounts(connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, name, account_type, balance, created_at, updated_at
            FROM account ORDER BY id ASC;",
        )?
        .query_map([], map_row_to_account)?
        .map(|maybe_account| maybe_account.map_err(|error| error.into()))
        .collect()
}

/// Initialize the account table.
///
/// The unique index over name, type and balance is what makes account creation idempotent.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            account_type TEXT NOT NULL,
            balance REAL NOT NULL DEFAULT 0.0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_account_natural_key
            ON account(name, account_type, balance);",
    )?;

    Ok(())
}

pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: row.get(2)?,
        balance: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
