use anchor_lang::prelude::*;
use anchor_lang::solana_program;

use super::{
    secp256k1_keccak256::verify_secp256k1, secp256r1_sha256::verify_secp256r1, VerifiedMessage,
};
use crate::{error::ErrorCode, types::transaction::transaction::UserOp};

/// Instructions sysvar only, nothing is written.
#[derive(Accounts)]
pub struct CheckSignature<'info> {
    /// CHECK: Instructions sysvar, verified by address
    #[account(address = solana_program::sysvar::instructions::id())]
    pub instructions: AccountInfo<'info>,
}

/// Turns a cross-check into a verdict: a proof over another key, message or
/// challenge is `Ok(false)`, a malformed request stays an error.
pub fn signature_verdict(result: Result<VerifiedMessage>) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(error)
            if [
                error!(ErrorCode::KeyMismatch),
                error!(ErrorCode::MessageMismatch),
                error!(ErrorCode::ChallengeMismatch),
            ]
            .contains(&error) =>
        {
            Ok(false)
        }
        Err(error) => Err(error),
    }
}

pub fn check_secp256k1_signature_impl(
    ctx: Context<CheckSignature>,
    user_op: UserOp,
) -> Result<bool> {
    let verified = signature_verdict(verify_secp256k1(&ctx.accounts.instructions, &user_op))?;

    msg!("secp256k1 signature check: {}", verified);
    Ok(verified)
}

pub fn check_secp256r1_signature_impl(
    ctx: Context<CheckSignature>,
    user_op: UserOp,
) -> Result<bool> {
    let verified = signature_verdict(verify_secp256r1(&ctx.accounts.instructions, &user_op))?;

    msg!("secp256r1 signature check: {}", verified);
    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        codec,
        preprocess::{ethereum::personal_sign_message, precompile::*},
        types::{
            identity::{wallet::WalletType, Identity},
            transaction::transaction::{Action, Auth, Transaction},
        },
    };

    fn ethereum_op(address: [u8; 20]) -> UserOp {
        UserOp {
            auth: Auth {
                identity: Identity::Wallet(WalletType::Ethereum(address)),
                verification_context: None,
            },
            transaction: Transaction {
                account_id: 2,
                nonce: 0,
                action: Action::RemoveAccount,
            },
        }
    }

    fn signed_by(address: [u8; 20], transaction: &Transaction) -> InstructionBundle {
        let message = personal_sign_message(transaction).unwrap();
        InstructionBundle::following(vec![
            secp256k1_instruction(&address, &[0x11; 64], 0, &message, 0).unwrap()
        ])
    }

    #[test]
    fn matching_proof_is_true() {
        let user_op = ethereum_op([0xA1; 20]);
        let bundle = signed_by([0xA1; 20], &user_op.transaction);

        assert!(signature_verdict(verify_secp256k1(&bundle, &user_op)).unwrap());
    }

    #[test]
    fn proof_for_other_signer_or_message_is_false() {
        let user_op = ethereum_op([0xA1; 20]);

        let other_signer = signed_by([0xB2; 20], &user_op.transaction);
        assert!(!signature_verdict(verify_secp256k1(&other_signer, &user_op)).unwrap());

        let mut other_transaction = user_op.transaction.clone();
        other_transaction.nonce = 1;
        let other_message = signed_by([0xA1; 20], &other_transaction);
        assert!(!signature_verdict(verify_secp256k1(&other_message, &user_op)).unwrap());
    }

    #[test]
    fn malformed_request_is_still_an_error() {
        let user_op = ethereum_op([0xA1; 20]);

        let err =
            signature_verdict(verify_secp256k1(&InstructionBundle::following(vec![]), &user_op))
                .unwrap_err();
        assert_eq!(err, error!(ErrorCode::MissingVerificationInstruction));

        let mut passkey_op = user_op.clone();
        passkey_op.auth.identity = Identity::Wallet(WalletType::Secp256r1([0x02; 33]));
        let bytes = codec::encode(&passkey_op.transaction).unwrap();
        let bundle = InstructionBundle::following(vec![
            secp256r1_instruction(&[0x11; 64], &[0x02; 33], &bytes).unwrap()
        ]);
        let err = signature_verdict(verify_secp256k1(&bundle, &passkey_op)).unwrap_err();
        assert_eq!(err, error!(ErrorCode::UnsupportedIdentity));
        assert!(signature_verdict(verify_secp256r1(&bundle, &passkey_op)).unwrap());
    }
}
