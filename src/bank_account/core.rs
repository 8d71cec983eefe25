//! Core bank account domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, timezone::format_local_timestamp};

pub type BankAccountId = DatabaseId;

/// The validated fields for creating a bank account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBankAccount {
    /// A label for the account, e.g. "Operating Account".
    pub name: String,
    /// The account number, unique across all bank accounts.
    pub account_number: String,
    /// The name of the bank holding the account.
    pub bank_name: String,
    /// The balance in dollars when the account was opened.
    pub opening_balance: f64,
    /// When the account was opened, `None` means the time the record is created.
    pub opening_balance_date: Option<OffsetDateTime>,
}

/// A bank account that holds the business's money.
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    pub id: BankAccountId,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub opening_balance: f64,
    pub opening_balance_date: OffsetDateTime,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// The bank account fields echoed back to the client after a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountData {
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub opening_balance: f64,
    /// The opening balance date as "YYYY-MM-DD HH:MM:SS" local time, or `None` if not given.
    pub opening_balance_date: Option<String>,
}

impl NewBankAccount {
    /// The fields to echo back to the client, with dates in `local_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn to_data(&self, local_timezone: &str) -> Result<BankAccountData, Error> {
        let opening_balance_date = self
            .opening_balance_date
            .map(|date| format_local_timestamp(date, local_timezone))
            .transpose()?;

        Ok(BankAccountData {
            name: self.name.clone(),
            account_number: self.account_number.clone(),
            bank_name: self.bank_name.clone(),
            opening_balance: self.opening_balance,
            opening_balance_date,
        })
    }
}

/// A bank account formatted for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccountView {
    pub id: String,
    pub name: String,
    pub account_number: String,
    pub bank_name: String,
    pub opening_balance: f64,
    pub opening_balance_date: String,
    pub created_at: String,
    pub updated_at: String,
}

impl BankAccount {
    /// Format the bank account for a response, with timestamps in `local_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn to_view(&self, local_timezone: &str) -> Result<BankAccountView, Error> {
        Ok(BankAccountView {
            id: self.id.to_string(),
            name: self.name.clone(),
            account_number: self.account_number.clone(),
            bank_name: self.bank_name.clone(),
            opening_balance: self.opening_balance,
            opening_balance_date: format_local_timestamp(
                self.opening_balance_date,
                local_timezone,
            )?,
            created_at: format_local_timestamp(self.created_at, local_timezone)?,
            updated_at: format_local_timestamp(self.updated_at, local_timezone)?,
        })
    }
}
