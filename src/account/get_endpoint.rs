//! Defines the endpoint for getting a single account by its ID.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    account::{AccountId, AccountView, get_account, list_endpoint::AccountQueryState},
    params::ApiQuery,
};

/// The query parameters for getting an account.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetAccountParams {
    /// The ID of the account as returned by the list endpoint.
    pub account_id: Option<String>,
}

/// The response body for a single account.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountResponse {
    pub account: AccountView,
}

/// A route handler for getting an account by its ID.
///
/// Responds with 400 if `account_id` is missing or blank and 404 if no account has the ID.
pub async fn get_account_endpoint(
    State(state): State<AccountQueryState>,
    ApiQuery(params): ApiQuery<GetAccountParams>,
) -> Result<Json<AccountResponse>, Error> {
    let raw_id = params
        .account_id
        .filter(|account_id| !account_id.trim().is_empty())
        .ok_or(Error::MissingAccountId)?;

    // IDs are opaque to clients, so an ID that is not an integer cannot match any account.
    let account_id: AccountId = raw_id.trim().parse().map_err(|_| {
        tracing::debug!("Got non-numeric account ID {raw_id:?}");
        Error::AccountNotFound
    })?;

    let account = state
        .database
        .run(move |connection| get_account(account_id, connection))
        .await
        .map_err(|error| match error {
            Error::NotFound => Error::AccountNotFound,
            error => error,
        })?;

    Ok(Json(AccountResponse {
        account: account.to_view(&state.local_timezone)?,
    }))
}
