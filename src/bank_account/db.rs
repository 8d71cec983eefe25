//! Database operations for bank accounts.

use rusqlite::{Connection, OptionalExtension, Row, params};
use time::OffsetDateTime;

use crate::{
    Error,
    bank_account::{BankAccount, NewBankAccount},
};

/// Insert a bank account unless its account number is already taken.
///
/// If `new_bank_account` has no opening balance date, `now` is used.
///
/// # Errors
/// Returns:
/// - [Error::DuplicateBankAccount] if a bank account with the same name, account number,
///   bank name and opening balance exists.
/// - [Error::DuplicateAccountNumber] if another bank account with different details uses the
///   account number.
pub fn create_bank_account(
    new_bank_account: &NewBankAccount,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<BankAccount, Error> {
    let opening_balance_date = new_bank_account.opening_balance_date.unwrap_or(now);

    let insert_result = connection.execute(
        "INSERT INTO bank_account (
            name, account_number, bank_name, opening_balance, opening_balance_date,
            created_at, updated_at
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
        params![
            new_bank_account.name,
            new_bank_account.account_number,
            new_bank_account.bank_name,
            new_bank_account.opening_balance,
            opening_balance_date,
            now
        ],
    );

    match insert_result {
        Ok(_) => {}
        // Code 2067 occurs when a UNIQUE constraint failed.
        Err(rusqlite::Error::SqliteFailure(error, Some(_))) if error.extended_code == 2067 => {
            return Err(classify_duplicate(new_bank_account, connection)?);
        }
        Err(error) => return Err(error.into()),
    }

    let id = connection.last_insert_rowid();

    Ok(BankAccount {
        id,
        name: new_bank_account.name.clone(),
        account_number: new_bank_account.account_number.clone(),
        bank_name: new_bank_account.bank_name.clone(),
        opening_balance: new_bank_account.opening_balance,
        opening_balance_date,
        created_at: now,
        updated_at: now,
    })
}

/// Decide whether an account number clash is the same bank account sent twice.
fn classify_duplicate(
    new_bank_account: &NewBankAccount,
    connection: &Connection,
) -> Result<Error, Error> {
    let existing = connection
        .query_row(
            "SELECT name, bank_name, opening_balance FROM bank_account
            WHERE account_number = ?1",
            [&new_bank_account.account_number],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, f64>(2)?,
                ))
            },
        )
        .optional()?;

    let is_same_account = existing.is_some_and(|(name, bank_name, opening_balance)| {
        name == new_bank_account.name
            && bank_name == new_bank_account.bank_name
            && opening_balance == new_bank_account.opening_balance
    });

    if is_same_account {
        Ok(Error::DuplicateBankAccount)
    } else {
        Ok(Error::DuplicateAccountNumber)
    }
}

/// Retrieve all bank accounts in the order they were created.
pub fn get_all_bank_accounts(connection: &Connection) -> Result<Vec<BankAccount>, Error> {
    connection
        .prepare(
            "SELECT id, name, account_number, bank_name, opening_balance, opening_balance_date,
                created_at, updated_at
            FROM bank_account ORDER BY id ASC;",
        )?
        .query_map([], map_row_to_bank_account)?
        .map(|maybe_bank_account| maybe_bank_account.map_err(|error| error.into()))
        .collect()
}

/// Initialize the bank account table.
pub fn create_bank_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS bank_account (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            account_number TEXT NOT NULL UNIQUE,
            bank_name TEXT NOT NULL,
            opening_balance REAL NOT NULL DEFAULT 0.0,
            opening_balance_date TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

fn map_row_to_bank_account(row: &Row) -> Result<BankAccount, rusqlite::Error> {
    Ok(BankAccount {
        id: row.get(0)?,
        name: row.get(1)?,
        account_number: row.get(2)?,
        bank_name: row.get(3)?,
        opening_balance: row.get(4)?,
        opening_balance_date: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
