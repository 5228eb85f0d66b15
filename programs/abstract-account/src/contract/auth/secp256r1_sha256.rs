use anchor_lang::prelude::*;
use bytemuck::{Pod, Zeroable};

use super::{
    precompile::{
        locate_and_parse_external_proof, slice_at, InstructionSource, NativeSignatureVerifier,
        ParsedProof,
    },
    webauthn::{verify_client_data, webauthn_signed_message},
    VerifiedMessage,
};
use crate::{
    codec,
    error::ErrorCode,
    traits::signable_message::transaction_challenge,
    types::{
        identity::{wallet::WalletType, Identity},
        transaction::transaction::{UserOp, VerificationContext},
    },
};

/// Secp256r1SigVerify1111111111111111111111111
pub const SECP256R1_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    6, 146, 13, 236, 47, 234, 113, 181, 183, 35, 129, 77, 116, 45, 169, 3, 28, 131, 231, 95, 219,
    121, 93, 86, 142, 117, 71, 128, 32, 0, 0, 0,
]);

pub const SIGNATURE_OFFSETS_START: usize = 2;
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 14;
pub const DATA_START: usize = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE;
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;
pub const COMPRESSED_PUBKEY_SERIALIZED_SIZE: usize = 33;

/// Instruction index value meaning "this instruction".
pub const CURRENT_INSTRUCTION: u16 = u16::MAX;

#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C, packed)]
pub struct Secp256r1SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u16,
    pub public_key_offset: u16,
    pub public_key_instruction_index: u16,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u16,
}

pub struct Secp256r1Sha256;

impl NativeSignatureVerifier for Secp256r1Sha256 {
    fn program_id() -> Pubkey {
        SECP256R1_PROGRAM_ID
    }

    fn parse(data: &[u8], _instruction_index: usize) -> Result<ParsedProof> {
        if data.len() < 2 {
            return err!(ErrorCode::InvalidInstructionData);
        }

        if data[0] != 1 {
            return err!(ErrorCode::MultipleSignaturesNotSupported);
        }

        if data.len() < DATA_START {
            return err!(ErrorCode::InvalidInstructionData);
        }
        let offsets: Secp256r1SignatureOffsets =
            *bytemuck::try_from_bytes(&data[SIGNATURE_OFFSETS_START..DATA_START])
                .map_err(|_| error!(ErrorCode::InvalidOffsets))?;

        let Secp256r1SignatureOffsets {
            signature_offset,
            signature_instruction_index,
            public_key_offset,
            public_key_instruction_index,
            message_data_offset,
            message_data_size,
            message_instruction_index,
        } = offsets;

        if signature_instruction_index != CURRENT_INSTRUCTION
            || public_key_instruction_index != CURRENT_INSTRUCTION
            || message_instruction_index != CURRENT_INSTRUCTION
        {
            return err!(ErrorCode::DataInOtherInstructionsNotSupported);
        }

        let public_key = slice_at(
            data,
            public_key_offset as usize,
            COMPRESSED_PUBKEY_SERIALIZED_SIZE,
        )?;
        let signature = slice_at(data, signature_offset as usize, SIGNATURE_SERIALIZED_SIZE)?;
        let message = slice_at(
            data,
            message_data_offset as usize,
            message_data_size as usize,
        )?;

        Ok(ParsedProof {
            public_key: public_key.to_vec(),
            signature: signature.to_vec(),
            message: message.to_vec(),
        })
    }
}

/// Proves `user_op.transaction` was signed by a P-256 key: a raw secp256r1
/// wallet or a passkey.
///
/// - `Wallet(Secp256r1)`: the precompile message is the encoded transaction.
/// - `WebAuthn`: the precompile message is `authenticator_data || sha256(client_data)`
///   and the client data challenge must be the transaction challenge.
///
/// Key, then message, then challenge are checked so a forged proof reports
/// the first field that diverges.
pub fn verify_secp256r1(
    instructions: &impl InstructionSource,
    user_op: &UserOp,
) -> Result<VerifiedMessage> {
    let transaction_bytes = codec::encode(&user_op.transaction)?;

    let (expected_key, expected_message, client_data) = match &user_op.auth.identity {
        Identity::Wallet(WalletType::Secp256r1(public_key)) => {
            (*public_key, transaction_bytes.clone(), None)
        }
        Identity::WebAuthn(authenticator) => {
            let Some(VerificationContext::WebAuthn(context)) = &user_op.auth.verification_context
            else {
                return err!(ErrorCode::MissingVerificationContext);
            };
            (
                authenticator.compressed_public_key,
                webauthn_signed_message(&context.authenticator_data, &context.client_data),
                Some(context.client_data.as_str()),
            )
        }
        _ => return err!(ErrorCode::UnsupportedIdentity),
    };

    let proof = locate_and_parse_external_proof::<Secp256r1Sha256>(instructions)?;

    if proof.public_key != expected_key {
        return err!(ErrorCode::KeyMismatch);
    }

    if proof.message != expected_message {
        return err!(ErrorCode::MessageMismatch);
    }

    if let Some(client_data) = client_data {
        verify_client_data(client_data, &transaction_challenge(&transaction_bytes))?;
    }

    Ok(VerifiedMessage {
        identity: user_op.auth.identity.clone(),
        message: transaction_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        preprocess::precompile::{
            secp256r1_instruction, secp256r1_instruction_data, InstructionBundle,
        },
        traits::signable_message::ethereum_signed_message,
        types::transaction::transaction::{Action, Auth, Transaction},
    };

    const WALLET_KEY: [u8; 33] = [0x03; 33];

    fn wallet_op() -> UserOp {
        UserOp {
            auth: Auth {
                identity: Identity::Wallet(WalletType::Secp256r1(WALLET_KEY)),
                verification_context: None,
            },
            transaction: Transaction {
                account_id: 4,
                nonce: 9,
                action: Action::RemoveAccount,
            },
        }
    }

    fn signed(public_key: &[u8; 33], message: &[u8]) -> InstructionBundle {
        InstructionBundle::following(vec![
            secp256r1_instruction(&[0x44; 64], public_key, message).unwrap()
        ])
    }

    #[test]
    fn wallet_signs_raw_transaction_bytes() {
        let user_op = wallet_op();
        let transaction_bytes = codec::encode(&user_op.transaction).unwrap();

        let verified =
            verify_secp256r1(&signed(&WALLET_KEY, &transaction_bytes), &user_op).unwrap();

        assert_eq!(verified.identity, user_op.auth.identity);
        assert_eq!(verified.message, transaction_bytes);
    }

    #[test]
    fn wallet_rejects_other_key() {
        let user_op = wallet_op();
        let transaction_bytes = codec::encode(&user_op.transaction).unwrap();

        let err =
            verify_secp256r1(&signed(&[0x02; 33], &transaction_bytes), &user_op).unwrap_err();

        assert_eq!(err, error!(ErrorCode::KeyMismatch));
    }

    #[test]
    fn wallet_rejects_wrapped_messages() {
        let user_op = wallet_op();
        let transaction_bytes = codec::encode(&user_op.transaction).unwrap();

        for message in [
            ethereum_signed_message(&transaction_bytes),
            webauthn_signed_message(&[0x49; 37], "{}"),
        ] {
            let err = verify_secp256r1(&signed(&WALLET_KEY, &message), &user_op).unwrap_err();
            assert_eq!(err, error!(ErrorCode::MessageMismatch));
        }
    }

    #[test]
    fn ethereum_wallet_is_not_a_p256_identity() {
        let mut user_op = wallet_op();
        user_op.auth.identity = Identity::Wallet(WalletType::Ethereum([1; 20]));

        let err = verify_secp256r1(&signed(&WALLET_KEY, b"x"), &user_op).unwrap_err();

        assert_eq!(err, error!(ErrorCode::UnsupportedIdentity));
    }

    #[test]
    fn program_id_matches_base58() {
        assert_eq!(
            SECP256R1_PROGRAM_ID.to_string(),
            "Secp256r1SigVerify1111111111111111111111111"
        );
    }

    #[test]
    fn parses_single_signature_layout() {
        let data = secp256r1_instruction_data(&[1; 64], &[2; 33], b"message").unwrap();

        let proof = Secp256r1Sha256::parse(&data, 0).unwrap();

        assert_eq!(proof.signature, vec![1; 64]);
        assert_eq!(proof.public_key, vec![2; 33]);
        assert_eq!(proof.message, b"message".to_vec());
    }

    #[test]
    fn rejects_explicit_instruction_index() {
        let mut data = secp256r1_instruction_data(&[1; 64], &[2; 33], b"message").unwrap();
        // public_key_instruction_index
        data[8..10].copy_from_slice(&0u16.to_le_bytes());

        let err = Secp256r1Sha256::parse(&data, 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::DataInOtherInstructionsNotSupported));
    }

    #[test]
    fn rejects_key_offset_out_of_bounds() {
        let mut data = secp256r1_instruction_data(&[1; 64], &[2; 33], b"message").unwrap();
        let past_end = (data.len() - 10) as u16;
        data[6..8].copy_from_slice(&past_end.to_le_bytes());

        let err = Secp256r1Sha256::parse(&data, 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidOffsets));
    }

    #[test]
    fn rejects_two_signatures() {
        let mut data = secp256r1_instruction_data(&[1; 64], &[2; 33], b"message").unwrap();
        data[0] = 2;

        let err = Secp256r1Sha256::parse(&data, 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::MultipleSignaturesNotSupported));
    }
}
