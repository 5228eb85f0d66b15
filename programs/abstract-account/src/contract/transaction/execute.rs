use anchor_lang::prelude::*;
use anchor_lang::solana_program;

use super::validation::is_transaction_authorized;
use crate::{
    codec,
    contract::auth::{
        oidc::verify_oidc,
        rsa::rsa_multi_tx::{ModpowState, OperationId},
        secp256k1_keccak256::verify_secp256k1,
        secp256r1_sha256::verify_secp256r1,
        VerifiedMessage,
    },
    events::{AccountRemoved, TransactionExecuted},
    pda_seeds::{ABSTRACT_ACCOUNT_SEED, RSA_MODPOW_SEED},
    types::{
        account::{AbstractAccount, AccountId, Nonce},
        transaction::transaction::{Action, Transaction, UserOp},
    },
    utils::pda::resize_account,
};

/// What the caller must do with the account record after a transaction ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The action was applied in memory and the nonce advanced past `executed_nonce`.
    Applied {
        executed_nonce: Nonce,
        action_kind: &'static str,
    },
    /// The account must be closed, no further transaction can run on it.
    AccountRemoved,
}

/// Decodes, authorizes and applies a verified message to `abstract_account`.
///
/// Every check runs before the first mutation, so on error the account is
/// left exactly as it was.
pub fn execute_transaction(
    abstract_account: &mut AbstractAccount,
    verified: &VerifiedMessage,
) -> Result<ExecutionOutcome> {
    let transaction: Transaction = codec::decode(&verified.message)?;

    is_transaction_authorized(abstract_account, &verified.identity, &transaction)?;

    let next_nonce = abstract_account.next_nonce()?;
    let action_kind = transaction.action.kind();

    match transaction.action {
        Action::RemoveAccount => return Ok(ExecutionOutcome::AccountRemoved),
        Action::AddIdentity(identity_with_permissions) => {
            abstract_account.add_identity(identity_with_permissions)?;
        }
        Action::RemoveIdentity(identity) => {
            abstract_account.remove_identity(&identity)?;
        }
    }

    abstract_account.nonce = next_nonce;

    Ok(ExecutionOutcome::Applied {
        executed_nonce: transaction.nonce,
        action_kind,
    })
}

pub struct AbstractAccountOperationAccounts<'a, 'info> {
    pub abstract_account: &'a mut Account<'info, AbstractAccount>,
    pub signer_info: AccountInfo<'info>,
    pub system_program_info: AccountInfo<'info>,
}

impl AbstractAccountOperationAccounts<'_, '_> {
    /// Runs the transaction and persists its effect on the account record.
    pub fn execute(self, verified: &VerifiedMessage) -> Result<()> {
        let account_id = self.abstract_account.account_id;
        let outcome = execute_transaction(&mut **self.abstract_account, verified)?;

        match outcome {
            ExecutionOutcome::Applied {
                executed_nonce,
                action_kind,
            } => {
                resize_account(
                    &self.abstract_account.to_account_info(),
                    self.abstract_account.space(),
                    &self.signer_info,
                    &self.system_program_info,
                )?;

                msg!(
                    "Executed {} on account {} at nonce {}",
                    action_kind,
                    account_id,
                    executed_nonce
                );
                emit!(TransactionExecuted {
                    account_id,
                    nonce: executed_nonce,
                    action_kind: action_kind.to_string(),
                });
            }
            ExecutionOutcome::AccountRemoved => {
                self.abstract_account.close(self.signer_info)?;

                msg!("Removed account {}", account_id);
                emit!(AccountRemoved { account_id });
            }
        }

        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(account_id: AccountId)]
pub struct ExecuteWithPrecompile<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [ABSTRACT_ACCOUNT_SEED, account_id.to_le_bytes().as_ref()],
        bump = abstract_account.bump,
    )]
    pub abstract_account: Account<'info, AbstractAccount>,

    pub system_program: Program<'info, System>,

    /// CHECK: Instructions sysvar, verified by address
    #[account(address = solana_program::sysvar::instructions::id())]
    pub instructions: AccountInfo<'info>,
}

impl<'info> ExecuteWithPrecompile<'info> {
    fn operation_accounts(&mut self) -> AbstractAccountOperationAccounts<'_, 'info> {
        AbstractAccountOperationAccounts {
            abstract_account: &mut self.abstract_account,
            signer_info: self.signer.to_account_info(),
            system_program_info: self.system_program.to_account_info(),
        }
    }
}

pub fn execute_secp256k1_impl(ctx: Context<ExecuteWithPrecompile>, user_op: UserOp) -> Result<()> {
    let verified = verify_secp256k1(&ctx.accounts.instructions, &user_op)?;

    ctx.accounts.operation_accounts().execute(&verified)
}

pub fn execute_secp256r1_impl(ctx: Context<ExecuteWithPrecompile>, user_op: UserOp) -> Result<()> {
    let verified = verify_secp256r1(&ctx.accounts.instructions, &user_op)?;

    ctx.accounts.operation_accounts().execute(&verified)
}

#[derive(Accounts)]
#[instruction(account_id: AccountId, operation_id: OperationId)]
pub struct ExecuteOidc<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    // Consumed by the transaction, a verified token authorizes a single execution
    #[account(
        mut,
        seeds = [RSA_MODPOW_SEED, signer.key().as_ref(), operation_id.as_ref()],
        bump = modpow_state.bump,
        close = signer
    )]
    pub modpow_state: Account<'info, ModpowState>,

    #[account(
        mut,
        seeds = [ABSTRACT_ACCOUNT_SEED, account_id.to_le_bytes().as_ref()],
        bump = abstract_account.bump,
    )]
    pub abstract_account: Account<'info, AbstractAccount>,

    pub system_program: Program<'info, System>,
}

pub fn execute_oidc_impl(ctx: Context<ExecuteOidc>, user_op: UserOp) -> Result<()> {
    let owner = ctx.accounts.signer.key();
    let verified = verify_oidc(&ctx.accounts.modpow_state, &owner, &user_op)?;
    ctx.accounts.modpow_state.release(&owner)?;

    AbstractAccountOperationAccounts {
        abstract_account: &mut ctx.accounts.abstract_account,
        signer_info: ctx.accounts.signer.to_account_info(),
        system_program_info: ctx.accounts.system_program.to_account_info(),
    }
    .execute(&verified)
}
