use anchor_lang::prelude::*;

use crate::{
    events::AccountCreated,
    pda_seeds::{ABSTRACT_ACCOUNT_SEED, ACCOUNT_MANAGER_SEED},
    types::{
        account::AbstractAccount, account_manager::AccountManager,
        identity::IdentityWithPermissions,
    },
};

#[derive(Accounts)]
#[instruction(identity_with_permissions: IdentityWithPermissions)]
pub struct CreateAccount<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [ACCOUNT_MANAGER_SEED],
        bump = account_manager.bump,
    )]
    pub account_manager: Account<'info, AccountManager>,

    // `init` fails on an existing address, ids are never handed out twice
    #[account(
        init,
        payer = signer,
        space = AbstractAccount::initial_size(&identity_with_permissions),
        seeds = [ABSTRACT_ACCOUNT_SEED, account_manager.next_account_id.to_le_bytes().as_ref()],
        bump,
    )]
    pub abstract_account: Account<'info, AbstractAccount>,

    pub system_program: Program<'info, System>,
}

pub fn create_account_impl(
    ctx: Context<CreateAccount>,
    identity_with_permissions: IdentityWithPermissions,
) -> Result<()> {
    let account_id = ctx.accounts.account_manager.increment_next_account_id()?;

    ctx.accounts.abstract_account.set_inner(AbstractAccount::new(
        account_id,
        identity_with_permissions,
        ctx.bumps.abstract_account,
    ));

    msg!("Created account {}", account_id);
    emit!(AccountCreated {
        account_id,
        identity_count: 1,
    });

    Ok(())
}
