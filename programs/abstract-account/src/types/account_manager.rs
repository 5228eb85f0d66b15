use anchor_lang::prelude::*;

use super::account::AccountId;
use crate::error::ErrorCode;

#[account]
#[derive(Debug, Default)]
pub struct AccountManager {
    /*
    Id assigned to the next account created.

    Every time an account is created, the account_id is incremented by 1.
    If an account is deleted, we will have gap on the account_id. Ids are never reused,
    so a transaction signed for a deleted account can't be replayed on a new one.

    Enabling sequential account discovery and use minimal storage.
    */
    pub next_account_id: AccountId,

    // Signer of `init_contract`, the only key allowed to close the manager
    pub authority: Pubkey,

    // PDA bump to optimize Anchor account validation
    pub bump: u8,
}

impl AccountManager {
    const PDA_DISCRIMINATOR_SIZE: usize = 8;
    const ACCOUNT_ID_SIZE: usize = 8;
    const AUTHORITY_SIZE: usize = 32;
    const BUMP_SIZE: usize = 1;

    pub const INIT_SIZE: usize = Self::PDA_DISCRIMINATOR_SIZE
        + Self::ACCOUNT_ID_SIZE
        + Self::AUTHORITY_SIZE
        + Self::BUMP_SIZE;

    pub fn new(authority: Pubkey, bump: u8) -> Self {
        Self {
            next_account_id: 0,
            authority,
            bump,
        }
    }

    /// Hands out the current id and advances the counter.
    pub fn increment_next_account_id(&mut self) -> Result<AccountId> {
        let account_id = self.next_account_id;
        self.next_account_id = account_id
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::AccountIdOverflow))?;
        Ok(account_id)
    }

    /// Only the authority may close the manager, and only before the first id
    /// was handed out. A re-initialized manager restarts at id 0.
    pub fn ensure_closable(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(self.authority, *signer, ErrorCode::NotContractAuthority);
        require!(
            self.next_account_id == 0,
            ErrorCode::AccountIdsAlreadyIssued
        );
        Ok(())
    }
}
