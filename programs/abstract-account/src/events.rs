use anchor_lang::prelude::*;

use crate::types::account::{AccountId, Nonce};

#[event]
pub struct AccountCreated {
    pub account_id: AccountId,
    pub identity_count: u32,
}

#[event]
pub struct TransactionExecuted {
    pub account_id: AccountId,
    /// Nonce the transaction was signed for, the account now expects `nonce + 1`.
    pub nonce: Nonce,
    pub action_kind: String,
}

#[event]
pub struct AccountRemoved {
    pub account_id: AccountId,
}
