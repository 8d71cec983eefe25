//! Defines the endpoint for creating a new account.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, CreatedResponse, Error,
    account::{AccountType, NewAccount, create_account},
    db::Database,
    params::{ApiQuery, number_or_default, text_or_default},
};

const DEFAULT_NAME: &str = "Default Account";
const DEFAULT_BALANCE: f64 = 0.0;

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database for managing accounts.
    pub database: Database,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
        }
    }
}

/// The query parameters for creating an account.
///
/// Every parameter is optional, missing parameters take their default value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateAccountParams {
    /// The account name, defaults to "Default Account".
    pub name: Option<String>,
    /// The display name of the account type, defaults to "Sales".
    pub account_type: Option<String>,
    /// The balance in dollars, defaults to zero.
    pub balance: Option<String>,
}

impl TryFrom<CreateAccountParams> for NewAccount {
    type Error = Error;

    fn try_from(params: CreateAccountParams) -> Result<Self, Self::Error> {
        let name = text_or_default("name", params.name, DEFAULT_NAME)?;
        let account_type = match params.account_type {
            Some(account_type) => account_type.parse::<AccountType>()?,
            None => AccountType::Sales,
        };
        let balance = number_or_default("balance", params.balance.as_deref(), DEFAULT_BALANCE)?;

        Ok(NewAccount {
            name,
            account_type,
            balance,
        })
    }
}

/// A route handler for creating a new account.
///
/// Responds with the account fields that were used to create the account, or
/// a 400 error if an account with the same name, type and balance already exists.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    ApiQuery(params): ApiQuery<CreateAccountParams>,
) -> Result<Json<CreatedResponse<NewAccount>>, Error> {
    let new_account = NewAccount::try_from(params)?;

    let account_fields = new_account.clone();
    let account = state
        .database
        .run(move |connection| {
            create_account(&account_fields, OffsetDateTime::now_utc(), connection)
        })
        .await
        .inspect_err(|error| {
            if *error == Error::DuplicateAccount {
                tracing::debug!("Rejected duplicate account {new_account:?}");
            }
        })?;

    tracing::info!("Created account {} \"{}\"", account.id, account.name);

    Ok(Json(CreatedResponse::new(
        "Account created successfully!",
        new_account,
    )))
}

#[cfg(test)]
mod new_account_tests {
    use crate::{
        Error,
        account::{AccountType, NewAccount},
    };

    use super::CreateAccountParams;

    #[test]
    fn applies_defaults() {
        let got = NewAccount::try_from(CreateAccountParams::default());

        assert_eq!(
            got,
            Ok(NewAccount {
                name: "Default Account".to_owned(),
                account_type: AccountType::Sales,
                balance: 0.0,
            })
        );
    }

    #[test]
    fn uses_given_values() {
        let got = NewAccount::try_from(CreateAccountParams {
            name: Some("Owner Drawings".to_owned()),
            account_type: Some("Owner's Equity".to_owned()),
            balance: Some("-250.5".to_owned()),
        });

        assert_eq!(
            got,
            Ok(NewAccount {
                name: "Owner Drawings".to_owned(),
                account_type: AccountType::OwnersEquity,
                balance: -250.5,
            })
        );
    }

    #[test]
    fn fails_on_invalid_account_type() {
        let got = NewAccount::try_from(CreateAccountParams {
            account_type: Some("Dividends".to_owned()),
            ..Default::default()
        });

        assert_eq!(got, Err(Error::InvalidAccountType("Dividends".to_owned())));
    }

    #[test]
    fn fails_on_non_numeric_balance() {
        let got = NewAccount::try_from(CreateAccountParams {
            balance: Some("a lot".to_owned()),
            ..Default::default()
        });

        assert_eq!(
            got,
            Err(Error::InvalidNumber {
                field: "balance",
                value: "a lot".to_owned()
            })
        );
    }

    #[test]
    fn fails_on_blank_name() {
        let got = NewAccount::try_from(CreateAccountParams {
            name: Some("   ".to_owned()),
            ..Default::default()
        });

        assert_eq!(got, Err(Error::EmptyField("name")));
    }
}
