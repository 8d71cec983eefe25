//! Core account domain types.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId, timezone::format_local_timestamp};

pub type AccountId = DatabaseId;

/// The category of an account in the chart of accounts.
///
/// Accounts are stored and sent to clients using their display names, e.g. "Owner's Equity".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum AccountType {
    /// Revenue from the main business activity.
    Sales,
    /// The direct cost of the goods or services sold.
    CostOfSales,
    /// Operating expenses.
    Expenses,
    /// Tax on income.
    IncomeTax,
    /// Long-term assets, e.g. property and equipment.
    NonCurrentAssets,
    /// Assets expected to be used within a year, e.g. cash and receivables.
    CurrentAssets,
    /// Obligations due within a year.
    CurrentLiabilities,
    /// Obligations due after more than a year.
    NonCurrentLiabilities,
    /// The owners' stake in the business.
    OwnersEquity,
    /// Income from outside the main business activity.
    OtherIncomes,
}

impl AccountType {
    /// Every account type, in the order they are presented to clients.
    pub const ALL: [AccountType; 10] = [
        AccountType::Sales,
        AccountType::CostOfSales,
        AccountType::Expenses,
        AccountType::IncomeTax,
        AccountType::NonCurrentAssets,
        AccountType::CurrentAssets,
        AccountType::CurrentLiabilities,
        AccountType::NonCurrentLiabilities,
        AccountType::OwnersEquity,
        AccountType::OtherIncomes,
    ];

    /// The display name of the account type.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Sales => "Sales",
            AccountType::CostOfSales => "Cost of Sales",
            AccountType::Expenses => "Expenses",
            AccountType::IncomeTax => "Income Tax",
            AccountType::NonCurrentAssets => "Non-Current Assets",
            AccountType::CurrentAssets => "Current Assets",
            AccountType::CurrentLiabilities => "Current Liabilities",
            AccountType::NonCurrentLiabilities => "Non-Current Liabilities",
            AccountType::OwnersEquity => "Owner's Equity",
            AccountType::OtherIncomes => "Other Incomes",
        }
    }
}

impl Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    /// Parse an account type from its exact display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountType::ALL
            .into_iter()
            .find(|account_type| account_type.as_str() == s)
            .ok_or_else(|| Error::InvalidAccountType(s.to_owned()))
    }
}

impl From<AccountType> for &'static str {
    fn from(value: AccountType) -> Self {
        value.as_str()
    }
}

impl TryFrom<String> for AccountType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl ToSql for AccountType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AccountType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// The validated fields for creating an account.
///
/// This is also the data echoed back to the client after a successful create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAccount {
    /// The name of the account, e.g. "Cash".
    pub name: String,
    /// The category of the account.
    pub account_type: AccountType,
    /// The balance in dollars.
    pub balance: f64,
}

/// An account in the chart of accounts.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The name of the account.
    pub name: String,
    /// The category of the account.
    pub account_type: AccountType,
    /// The balance in dollars.
    pub balance: f64,
    /// When the account was created.
    pub created_at: OffsetDateTime,
    /// When the account was last updated.
    pub updated_at: OffsetDateTime,
}

/// An account formatted for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    pub name: String,
    pub account_type: AccountType,
    pub balance: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    /// Format the account for a response, with timestamps in `local_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a known timezone.
    pub fn to_view(&self, local_timezone: &str) -> Result<AccountView, Error> {
        Ok(AccountView {
            id: self.id.to_string(),
            name: self.name.clone(),
            account_type: self.account_type,
            balance: self.balance,
            created_at: format_local_timestamp(self.created_at, local_timezone)?,
            updated_at: format_local_timestamp(self.updated_at, local_timezone)?,
        })
    }
}


#[cfg(test)]
mod account_view_tests {
    use time::macros::datetime;

    use super::{Account, AccountType, AccountView};

    #[test]
    fn formats_id_and_timestamps() {
        let account = Account {
            id: 7,
            name: "Cash".to_owned(),
            account_type: AccountType::CurrentAssets,
            balance: 100.0,
            created_at: datetime!(2024-06-01 12:34:56.789 UTC),
            updated_at: datetime!(2024-06-02 01:02:03 UTC),
        };

        let got = account.to_view("Etc/UTC");

        assert_eq!(
            got,
            Ok(AccountView {
                id: "7".to_owned(),
                name: "Cash".to_owned(),
                account_type: AccountType::CurrentAssets,
                balance: 100.0,
                created_at: "2024-06-01 12:34:56".to_owned(),
                updated_at: "2024-06-02 01:02:03".to_owned(),
            })
        );
    }
}
