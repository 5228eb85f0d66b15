use anchor_lang::prelude::*;

pub mod codec;
pub mod config;
pub mod contract;
pub mod error;
pub mod events;
pub mod pda_seeds;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(not(target_os = "solana"))]
pub mod preprocess;

use crate::contract::accounts::*;
use crate::contract::auth::rsa::{rsa_multi_tx::*, utils::OidcVerificationData};
use crate::contract::auth::signature_check::*;
use crate::contract::contract_lifecycle::*;
use crate::contract::transaction::execute::*;
use crate::types::{
    account::AccountId, identity::IdentityWithPermissions, transaction::transaction::UserOp,
};

declare_id!("2PYNfKSoM7rFJeMuvEidASxgpdPAXYascVDmH6jpBa7o");

#[program]
pub mod solana_abstract_account {
    use super::*;

    pub fn init_contract(ctx: Context<InitContract>) -> Result<()> {
        init_contract_impl(ctx)
    }

    pub fn close_contract(ctx: Context<CloseContract>) -> Result<()> {
        close_contract_impl(ctx)
    }

    pub fn create_account(
        ctx: Context<CreateAccount>,
        identity_with_permissions: IdentityWithPermissions,
    ) -> Result<()> {
        create_account_impl(ctx, identity_with_permissions)
    }

    /// Must be preceded by a secp256k1 precompile instruction over the signed message.
    pub fn execute_secp256k1(
        ctx: Context<ExecuteWithPrecompile>,
        _account_id: AccountId,
        user_op: UserOp,
    ) -> Result<()> {
        execute_secp256k1_impl(ctx, user_op)
    }

    /// Must be preceded by a secp256r1 precompile instruction over the signed message.
    pub fn execute_secp256r1(
        ctx: Context<ExecuteWithPrecompile>,
        _account_id: AccountId,
        user_op: UserOp,
    ) -> Result<()> {
        execute_secp256r1_impl(ctx, user_op)
    }

    /// Read-only: whether the preceding secp256k1 precompile instruction signed `user_op`.
    pub fn check_secp256k1_signature(
        ctx: Context<CheckSignature>,
        user_op: UserOp,
    ) -> Result<bool> {
        check_secp256k1_signature_impl(ctx, user_op)
    }

    /// Read-only: whether the preceding secp256r1 precompile instruction signed `user_op`.
    pub fn check_secp256r1_signature(
        ctx: Context<CheckSignature>,
        user_op: UserOp,
    ) -> Result<bool> {
        check_secp256r1_signature_impl(ctx, user_op)
    }

    pub fn init_rsa_verification(
        ctx: Context<InitRsaVerification>,
        operation_id: OperationId,
        verification_data: OidcVerificationData,
    ) -> Result<()> {
        init_rsa_verification_impl(ctx, operation_id, verification_data)
    }

    pub fn continue_rsa_verification(
        ctx: Context<ContinueRsaVerification>,
        _operation_id: OperationId,
    ) -> Result<bool> {
        continue_rsa_verification_impl(ctx)
    }

    pub fn finalize_rsa_verification(
        ctx: Context<FinalizeRsaVerification>,
        _operation_id: OperationId,
        verification_data: OidcVerificationData,
    ) -> Result<bool> {
        finalize_rsa_verification_impl(ctx, verification_data)
    }

    pub fn cleanup_rsa_verification(
        ctx: Context<CleanupRsaVerification>,
        _operation_id: OperationId,
    ) -> Result<()> {
        cleanup_rsa_verification_impl(ctx)
    }

    /// Consumes the completed RSA checkpoint `operation_id`.
    pub fn execute_oidc(
        ctx: Context<ExecuteOidc>,
        _account_id: AccountId,
        _operation_id: OperationId,
        user_op: UserOp,
    ) -> Result<()> {
        execute_oidc_impl(ctx, user_op)
    }
}
