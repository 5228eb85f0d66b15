pub mod account;
pub mod account_manager;
pub mod identity;
pub mod transaction;
