mod accounts;
mod auth;

pub use accounts::{delete_account, get_account, list_accounts, me, update_account};
pub use auth::{login, register, verify_account};
