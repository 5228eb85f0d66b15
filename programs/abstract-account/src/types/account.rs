use anchor_lang::prelude::*;

use super::identity::{Identity, IdentityWithPermissions};
use crate::error::ErrorCode;

pub type AccountId = u64;
pub type Nonce = u128;

/**
* Abstract Account PDA
*
* - Accounts are created sequentially with unique IDs managed by the AccountManager PDA
* - Once an account is deleted, its ID cannot be reused or recreated
* - The identity at index 0 is the primary identity, every other identity needs `enable_act_as` to operate the account
* - The primary identity is the one the account was created with, it can never be removed
*/
#[account]
#[derive(Debug, Default)]
pub struct AbstractAccount {
    pub account_id: AccountId,

    pub nonce: Nonce,

    // Considering ~10 identities per account, a Vec is cheaper than BTreeMap or HashMap
    // on both heap and stack.
    pub identities: Vec<IdentityWithPermissions>,

    // PDA bump to optimize Anchor account validation
    pub bump: u8,
}

impl AbstractAccount {
    const PDA_DISCRIMINATOR_SIZE: usize = 8;
    const ACCOUNT_ID_SIZE: usize = 8;
    const NONCE_SIZE: usize = 16;
    const VEC_SIZE: usize = 4;
    const BUMP_SIZE: usize = 1;

    pub const INIT_SIZE: usize = Self::PDA_DISCRIMINATOR_SIZE
        + Self::ACCOUNT_ID_SIZE
        + Self::NONCE_SIZE
        + Self::VEC_SIZE
        + Self::BUMP_SIZE;

    pub fn new(
        account_id: AccountId,
        identity_with_permissions: IdentityWithPermissions,
        bump: u8,
    ) -> Self {
        Self {
            account_id,
            nonce: 0,
            identities: vec![identity_with_permissions],
            bump,
        }
    }

    pub fn initial_size(identity_with_permissions: &IdentityWithPermissions) -> usize {
        Self::INIT_SIZE + identity_with_permissions.byte_size()
    }

    /// Bytes the account data needs to hold the current state.
    pub fn space(&self) -> usize {
        Self::INIT_SIZE
            + self
                .identities
                .iter()
                .map(IdentityWithPermissions::byte_size)
                .sum::<usize>()
    }

    pub fn next_nonce(&self) -> Result<Nonce> {
        self.nonce
            .checked_add(1)
            .ok_or_else(|| error!(ErrorCode::NonceOverflow))
    }

    pub fn has_identity(&self, identity: &Identity) -> bool {
        self.identities.iter().any(|i| &i.identity == identity)
    }

    pub fn find_identity(&self, identity: &Identity) -> Option<&IdentityWithPermissions> {
        self.identities.iter().find(|i| &i.identity == identity)
    }

    pub fn identity_position(&self, identity: &Identity) -> Option<usize> {
        self.identities.iter().position(|i| &i.identity == identity)
    }

    pub fn add_identity(&mut self, identity_with_permissions: IdentityWithPermissions) -> Result<()> {
        require!(
            !self.has_identity(&identity_with_permissions.identity),
            ErrorCode::IdentityAlreadyExists
        );

        self.identities.push(identity_with_permissions);
        Ok(())
    }

    pub fn is_primary(&self, identity: &Identity) -> bool {
        self.identities
            .first()
            .is_some_and(|primary| &primary.identity == identity)
    }

    /// Removes the first entry structurally equal to `identity`.
    ///
    /// The primary identity stays at index 0 for the whole life of the account,
    /// otherwise the next entry would inherit its rights.
    pub fn remove_identity(&mut self, identity: &Identity) -> Result<IdentityWithPermissions> {
        let position = self
            .identity_position(identity)
            .ok_or_else(|| error!(ErrorCode::IdentityNotFound))?;

        require!(self.identities.len() > 1, ErrorCode::CannotRemoveLastIdentity);
        require!(position != 0, ErrorCode::CannotRemovePrimaryIdentity);

        Ok(self.identities.remove(position))
    }
}
