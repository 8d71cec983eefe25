//! Defines the endpoints for the accounts API welcome message and for listing accounts.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, MessageResponse,
    account::{AccountView, get_all_accounts},
    db::Database,
};

/// The state needed to read accounts.
#[derive(Debug, Clone)]
pub struct AccountQueryState {
    /// The database for reading accounts.
    pub database: Database,
    /// The timezone to display timestamps in.
    pub local_timezone: String,
}

impl FromRef<AppState> for AccountQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The response body for listing accounts.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct AccountsResponse {
    pub accounts: Vec<AccountView>,
}

/// Greet clients of the accounts API.
pub async fn get_accounts_index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the accounts API!"))
}

/// A route handler for listing every account.
pub async fn get_all_accounts_endpoint(
    State(state): State<AccountQueryState>,
) -> Result<Json<AccountsResponse>, Error> {
    let accounts = state.database.run(get_all_accounts).await?;

    let accounts = accounts
        .iter()
        .map(|account| account.to_view(&state.local_timezone))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(AccountsResponse { accounts }))
}
