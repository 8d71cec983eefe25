//! Application router configuration.

use axum::{
    Router,
    http::{HeaderValue, Method, header::InvalidHeaderValue},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState,
    account::{
        create_account_endpoint, get_account_endpoint, get_account_types_endpoint,
        get_accounts_index, get_all_accounts_endpoint,
    },
    bank_account::{create_bank_account_endpoint, get_all_bank_accounts_endpoint, get_banks_index},
    endpoints,
    not_found::{get_404_not_found, get_405_method_not_allowed},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let account_routes = Router::new()
        .route(endpoints::ACCOUNTS, get(get_accounts_index))
        .route(endpoints::CREATE_ACCOUNT, post(create_account_endpoint))
        .route(endpoints::ALL_ACCOUNTS, get(get_all_accounts_endpoint))
        .route(endpoints::ACCOUNT_TYPES, get(get_account_types_endpoint))
        .route(endpoints::GET_ACCOUNT, get(get_account_endpoint))
        .route(endpoints::GET_ACCOUNT_NO_SLASH, get(get_account_endpoint));

    let bank_routes = Router::new()
        .route(endpoints::BANKS, get(get_banks_index))
        .route(
            endpoints::CREATE_BANK_ACCOUNT,
            post(create_bank_account_endpoint),
        )
        .route(
            endpoints::ALL_BANK_ACCOUNTS,
            get(get_all_bank_accounts_endpoint),
        );

    account_routes
        .merge(bank_routes)
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .with_state(state)
}

/// Build a CORS layer that lets a browser client served from `allowed_origin` call the API.
///
/// # Errors
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn build_cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin)?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST]))
}
