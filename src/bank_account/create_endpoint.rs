//! Defines the endpoint for creating a new bank account.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, CreatedResponse, Error,
    bank_account::{BankAccountData, NewBankAccount, create_bank_account},
    db::Database,
    params::{ApiQuery, number_or_default, text_or_default},
    timezone::parse_local_datetime,
};

const DEFAULT_NAME: &str = "Default Bank Account";
const DEFAULT_ACCOUNT_NUMBER: &str = "0000000000";
const DEFAULT_BANK_NAME: &str = "Default Bank";
const DEFAULT_OPENING_BALANCE: f64 = 0.0;

/// The state needed to create a bank account.
#[derive(Debug, Clone)]
pub struct CreateBankAccountState {
    /// The database for managing bank accounts.
    pub database: Database,
    /// The timezone that opening balance dates are entered in.
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateBankAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query parameters for creating a bank account.
///
/// Every parameter is optional, missing parameters take their default value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateBankAccountParams {
    pub name: Option<String>,
    pub account_number: Option<String>,
    pub bank_name: Option<String>,
    pub opening_balance: Option<String>,
    /// A local date-time, e.g. "2024-01-31 09:30:00" or "2024-01-31".
    pub opening_balance_date: Option<String>,
}

impl CreateBankAccountParams {
    /// Apply defaults and validate the parameters.
    ///
    /// An empty `opening_balance_date` is treated the same as a missing one.
    pub fn parse(self, local_timezone: &str) -> Result<NewBankAccount, Error> {
        let name = text_or_default("name", self.name, DEFAULT_NAME)?;
        let account_number =
            text_or_default("account_number", self.account_number, DEFAULT_ACCOUNT_NUMBER)?;
        let bank_name = text_or_default("bank_name", self.bank_name, DEFAULT_BANK_NAME)?;
        let opening_balance = number_or_default(
            "opening_balance",
            self.opening_balance.as_deref(),
            DEFAULT_OPENING_BALANCE,
        )?;
        let opening_balance_date = self
            .opening_balance_date
            .filter(|date| !date.trim().is_empty())
            .map(|date| parse_local_datetime("opening_balance_date", &date, local_timezone))
            .transpose()?;

        Ok(NewBankAccount {
            name,
            account_number,
            bank_name,
            opening_balance,
            opening_balance_date,
        })
    }
}

/// A route handler for creating a new bank account.
///
/// Responds with the fields that were used to create the bank account, or a 400
/// error if the bank account already exists or its account number is taken.
pub async fn create_bank_account_endpoint(
    State(state): State<CreateBankAccountState>,
    ApiQuery(params): ApiQuery<CreateBankAccountParams>,
) -> Result<Json<CreatedResponse<BankAccountData>>, Error> {
    let new_bank_account = params.parse(&state.local_timezone)?;
    let data = new_bank_account.to_data(&state.local_timezone)?;

    let bank_account = state
        .database
        .run(move |connection| {
            create_bank_account(&new_bank_account, OffsetDateTime::now_utc(), connection)
        })
        .await
        .inspect_err(|error| {
            if matches!(
                error,
                Error::DuplicateBankAccount | Error::DuplicateAccountNumber
            ) {
                tracing::debug!("Rejected bank account {data:?}: {error}");
            }
        })?;

    tracing::info!(
        "Created bank account {} \"{}\" at {}",
        bank_account.id,
        bank_account.name,
        bank_account.bank_name
    );

    Ok(Json(CreatedResponse::new(
        "Bank account created successfully!",
        data,
    )))
}

#[cfg(test)]
mod parse_params_tests {
    use time::macros::datetime;

    use crate::{Error, bank_account::NewBankAccount};

    use super::CreateBankAccountParams;

    #[test]
    fn applies_defaults() {
        let got = CreateBankAccountParams::default().parse("Etc/UTC");

        assert_eq!(
            got,
            Ok(NewBankAccount {
                name: "Default Bank Account".to_owned(),
                account_number: "0000000000".to_owned(),
                bank_name: "Default Bank".to_owned(),
                opening_balance: 0.0,
                opening_balance_date: None,
            })
        );
    }

    #[test]
    fn parses_opening_balance_date() {
        let got = CreateBankAccountParams {
            opening_balance_date: Some("2024-01-31".to_owned()),
            ..Default::default()
        }
        .parse("Etc/UTC")
        .expect("Could not parse params");

        assert_eq!(
            got.opening_balance_date,
            Some(datetime!(2024-01-31 00:00:00 UTC))
        );
    }

    #[test]
    fn empty_opening_balance_date_is_missing() {
        let got = CreateBankAccountParams {
            opening_balance_date: Some("".to_owned()),
            ..Default::default()
        }
        .parse("Etc/UTC")
        .expect("Could not parse params");

        assert_eq!(got.opening_balance_date, None);
    }

    #[test]
    fn fails_on_invalid_opening_balance_date() {
        let got = CreateBankAccountParams {
            opening_balance_date: Some("31/01/2024".to_owned()),
            ..Default::default()
        }
        .parse("Etc/UTC");

        assert_eq!(
            got,
            Err(Error::InvalidDate {
                field: "opening_balance_date",
                value: "31/01/2024".to_owned()
            })
        );
    }

    #[test]
    fn fails_on_non_numeric_opening_balance() {
        let got = CreateBankAccountParams {
            opening_balance: Some("$100".to_owned()),
            ..Default::default()
        }
        .parse("Etc/UTC");

        assert_eq!(
            got,
            Err(Error::InvalidNumber {
                field: "opening_balance",
                value: "$100".to_owned()
            })
        );
    }

    #[test]
    fn fails_on_blank_bank_name() {
        let got = CreateBankAccountParams {
            bank_name: Some(" ".to_owned()),
            ..Default::default()
        }
        .parse("Etc/UTC");

        assert_eq!(got, Err(Error::EmptyField("bank_name")));
    }
}
