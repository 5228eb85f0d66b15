use anchor_lang::prelude::*;

use crate::{
    error::ErrorCode,
    types::{
        account::AbstractAccount,
        identity::Identity,
        transaction::transaction::{Action, Transaction},
    },
};

/// Validates a verified transaction against the abstract account
///
/// This function performs the following validations, in order:
/// 1. The transaction targets this account
/// 2. The transaction nonce is exactly the account's current nonce
/// 3. The identity that signed it is registered on the account
/// 4. A non-primary identity holds `enable_act_as`, and never removes the account
///
/// Nothing is mutated, the caller applies the action once every check passed.
///
/// # Arguments
/// * `abstract_account` - The abstract account to validate against
/// * `identity` - The identity proven to have signed the transaction
/// * `transaction` - The decoded transaction
pub fn is_transaction_authorized(
    abstract_account: &AbstractAccount,
    identity: &Identity,
    transaction: &Transaction,
) -> Result<()> {
    if transaction.account_id != abstract_account.account_id {
        return err!(ErrorCode::AccountIdMismatch);
    }

    if transaction.nonce != abstract_account.nonce {
        return err!(ErrorCode::NonceMismatch);
    }

    let position = abstract_account
        .identity_position(identity)
        .ok_or_else(|| error!(ErrorCode::IdentityNotFound))?;

    // Index 0 is the primary identity
    if position == 0 {
        return Ok(());
    }

    let can_act_as = abstract_account.identities[position].can_act_as();
    match transaction.action {
        Action::RemoveAccount => err!(ErrorCode::ActingNotPermitted),
        Action::AddIdentity(_) | Action::RemoveIdentity(_) if can_act_as => Ok(()),
        Action::AddIdentity(_) | Action::RemoveIdentity(_) => err!(ErrorCode::ActingNotPermitted),
    }
}
