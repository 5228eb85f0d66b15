pub mod accounts;
pub mod auth;
pub mod contract_lifecycle;
pub mod transaction;
