//! Defines the endpoint that lists the allowed account types.

use axum::Json;
use serde::Serialize;

use crate::account::AccountType;

/// The response body for listing account types.
#[derive(Debug, Serialize, PartialEq)]
pub struct AccountTypesResponse {
    pub account_types: Vec<&'static str>,
}

/// A route handler that lists the display names of every account type, for populating choices
/// in the client.
pub async fn get_account_types_endpoint() -> Json<AccountTypesResponse> {
    Json(AccountTypesResponse {
        account_types: AccountType::ALL.iter().map(AccountType::as_str).collect(),
    })
}
