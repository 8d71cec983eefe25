//! Accounts in the chart of accounts.

mod core;
mod create_endpoint;
mod db;
mod get_endpoint;
mod list_endpoint;
mod types_endpoint;

pub use core::{Account, AccountId, AccountType, AccountView, NewAccount};
pub use create_endpoint::create_account_endpoint;
pub use db::{create_account, create_account_table, get_account, get_all_accounts};
pub use get_endpoint::get_account_endpoint;
pub use list_endpoint::{get_accounts_index, get_all_accounts_endpoint};
pub use types_endpoint::get_account_types_endpoint;
