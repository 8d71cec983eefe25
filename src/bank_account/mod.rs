//! Bank accounts that hold the business's money.

mod core;
mod create_endpoint;
mod db;
mod list_endpoint;

pub use core::{BankAccount, BankAccountData, BankAccountView, NewBankAccount};
pub use create_endpoint::create_bank_account_endpoint;
pub use db::{create_bank_account, create_bank_account_table, get_all_bank_accounts};
pub use list_endpoint::{get_all_bank_accounts_endpoint, get_banks_index};
