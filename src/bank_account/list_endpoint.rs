//! Defines the endpoints for the banks API welcome message and for listing bank accounts.

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, MessageResponse,
    bank_account::{BankAccountView, get_all_bank_accounts},
    db::Database,
};

/// The state needed to read bank accounts.
#[derive(Debug, Clone)]
pub struct BankAccountQueryState {
    pub database: Database,
    pub local_timezone: String,
}

impl FromRef<AppState> for BankAccountQueryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            database: state.database.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The response body for listing bank accounts.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct BankAccountsResponse {
    pub bank_accounts: Vec<BankAccountView>,
}

/// Greet clients of the banks API.
pub async fn get_banks_index() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the banks API!"))
}

/// A route handler for listing every bank account.
pub async fn get_all_bank_accounts_endpoint(
    State(state): State<BankAccountQueryState>,
) -> Result<Json<BankAccountsResponse>, Error> {
    let bank_accounts = state
        .database
        .run(get_all_bank_accounts)
        .await?
        .iter()
        .map(|bank_account| bank_account.to_view(&state.local_timezone))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(BankAccountsResponse { bank_accounts }))
}
