//! The API endpoints URIs.

/// The welcome message for the accounts API.
pub const ACCOUNTS: &str = "/api/accounts/";
/// The route for creating an account.
pub const CREATE_ACCOUNT: &str = "/api/accounts/create/";
/// The route for listing all accounts.
pub const ALL_ACCOUNTS: &str = "/api/accounts/all/";
/// The route for listing the account types.
pub const ACCOUNT_TYPES: &str = "/api/accounts/types/";
/// The route for getting a single account by its ID.
pub const GET_ACCOUNT: &str = "/api/accounts/get_account/";
/// [GET_ACCOUNT] without the trailing slash, which some clients send.
pub const GET_ACCOUNT_NO_SLASH: &str = "/api/accounts/get_account";
/// The welcome message for the banks API.
pub const BANKS: &str = "/api/banks/";
/// The route for creating a bank account.
pub const CREATE_BANK_ACCOUNT: &str = "/api/banks/create/";
/// The route for listing all bank accounts.
pub const ALL_BANK_ACCOUNTS: &str = "/api/banks/all/";

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ACCOUNTS);
        assert_endpoint_is_valid_uri(endpoints::CREATE_ACCOUNT);
        assert_endpoint_is_valid_uri(endpoints::ALL_ACCOUNTS);
        assert_endpoint_is_valid_uri(endpoints::ACCOUNT_TYPES);
        assert_endpoint_is_valid_uri(endpoints::GET_ACCOUNT);
        assert_endpoint_is_valid_uri(endpoints::GET_ACCOUNT_NO_SLASH);
        assert_endpoint_is_valid_uri(endpoints::BANKS);
        assert_endpoint_is_valid_uri(endpoints::CREATE_BANK_ACCOUNT);
        assert_endpoint_is_valid_uri(endpoints::ALL_BANK_ACCOUNTS);
    }
}
