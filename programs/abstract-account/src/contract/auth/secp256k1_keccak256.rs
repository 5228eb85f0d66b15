use anchor_lang::prelude::*;
use anchor_lang::solana_program::secp256k1_program;

use super::{
    precompile::{
        locate_and_parse_external_proof, slice_at, InstructionSource, NativeSignatureVerifier,
        ParsedProof,
    },
    VerifiedMessage,
};
use crate::{
    codec,
    error::ErrorCode,
    traits::signable_message::ethereum_signed_message,
    types::{
        identity::{wallet::WalletType, Identity},
        transaction::transaction::UserOp,
    },
};

/*
    secp256k1 keccak256 precompile (ek256)

    Instruction data layout:

        [0]         number of signatures, must be 1
        [1..12]     Secp256k1SignatureOffsets
        payload     eth_address (20) | signature (64) | recovery_id (1) | message
*/

pub const SIGNATURE_OFFSETS_START: usize = 1;
pub const SIGNATURE_OFFSETS_SERIALIZED_SIZE: usize = 11;
pub const ETH_ADDRESS_SIZE: usize = 20;
pub const SIGNATURE_SERIALIZED_SIZE: usize = 64;
pub const RECOVERY_ID_SIZE: usize = 1;

#[derive(Clone, Copy, Debug)]
pub struct Secp256k1SignatureOffsets {
    pub signature_offset: u16,
    pub signature_instruction_index: u8,
    pub eth_address_offset: u16,
    pub eth_address_instruction_index: u8,
    pub message_data_offset: u16,
    pub message_data_size: u16,
    pub message_instruction_index: u8,
}

impl Secp256k1SignatureOffsets {
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != SIGNATURE_OFFSETS_SERIALIZED_SIZE {
            return err!(ErrorCode::InvalidInstructionData);
        }
        Ok(Self {
            signature_offset: u16::from_le_bytes([data[0], data[1]]),
            signature_instruction_index: data[2],
            eth_address_offset: u16::from_le_bytes([data[3], data[4]]),
            eth_address_instruction_index: data[5],
            message_data_offset: u16::from_le_bytes([data[6], data[7]]),
            message_data_size: u16::from_le_bytes([data[8], data[9]]),
            message_instruction_index: data[10],
        })
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_OFFSETS_SERIALIZED_SIZE] {
        let mut bytes = [0u8; SIGNATURE_OFFSETS_SERIALIZED_SIZE];
        bytes[0..2].copy_from_slice(&self.signature_offset.to_le_bytes());
        bytes[2] = self.signature_instruction_index;
        bytes[3..5].copy_from_slice(&self.eth_address_offset.to_le_bytes());
        bytes[5] = self.eth_address_instruction_index;
        bytes[6..8].copy_from_slice(&self.message_data_offset.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.message_data_size.to_le_bytes());
        bytes[10] = self.message_instruction_index;
        bytes
    }
}

pub struct Secp256k1Keccak256;

impl NativeSignatureVerifier for Secp256k1Keccak256 {
    fn program_id() -> Pubkey {
        secp256k1_program::id()
    }

    /// The parsed `public_key` is the 20 byte Ethereum address, the precompile
    /// recovers the key from the signature and compares its address.
    fn parse(data: &[u8], instruction_index: usize) -> Result<ParsedProof> {
        if data.is_empty() {
            return err!(ErrorCode::InvalidInstructionData);
        }

        if data[0] != 1 {
            return err!(ErrorCode::MultipleSignaturesNotSupported);
        }

        let offsets_end = SIGNATURE_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE;
        if data.len() < offsets_end {
            return err!(ErrorCode::InvalidInstructionData);
        }
        let offsets =
            Secp256k1SignatureOffsets::from_bytes(&data[SIGNATURE_OFFSETS_START..offsets_end])?;

        // The precompile resolves each index against the transaction, so all of
        // them must point back at the precompile instruction itself.
        if offsets.signature_instruction_index as usize != instruction_index
            || offsets.eth_address_instruction_index as usize != instruction_index
            || offsets.message_instruction_index as usize != instruction_index
        {
            return err!(ErrorCode::DataInOtherInstructionsNotSupported);
        }

        let eth_address = slice_at(data, offsets.eth_address_offset as usize, ETH_ADDRESS_SIZE)?;
        let signature = slice_at(
            data,
            offsets.signature_offset as usize,
            SIGNATURE_SERIALIZED_SIZE + RECOVERY_ID_SIZE,
        )?;
        let message = slice_at(
            data,
            offsets.message_data_offset as usize,
            offsets.message_data_size as usize,
        )?;

        Ok(ParsedProof {
            public_key: eth_address.to_vec(),
            signature: signature.to_vec(),
            message: message.to_vec(),
        })
    }
}

/// Proves `user_op.transaction` was signed by the claimed Ethereum wallet.
///
/// The wallet signs the canonical transaction bytes as an EIP-191 personal
/// message, which is what the precompile instruction must have verified.
///
/// # Errors
///
/// - `UnsupportedIdentity` if the claimed identity is not an Ethereum wallet
/// - `MissingVerificationInstruction` / `InvalidVerificationProgramId` if the
///   preceding instruction is not a secp256k1 precompile call
/// - `KeyMismatch` if the precompile verified a different address
/// - `MessageMismatch` if the precompile verified a different message
pub fn verify_secp256k1(
    instructions: &impl InstructionSource,
    user_op: &UserOp,
) -> Result<VerifiedMessage> {
    let expected_address = match &user_op.auth.identity {
        Identity::Wallet(wallet @ WalletType::Ethereum(_)) => wallet.key_bytes(),
        _ => return err!(ErrorCode::UnsupportedIdentity),
    };

    let proof = locate_and_parse_external_proof::<Secp256k1Keccak256>(instructions)?;

    if proof.public_key != expected_address {
        return err!(ErrorCode::KeyMismatch);
    }

    let transaction_bytes = codec::encode(&user_op.transaction)?;
    if proof.message != ethereum_signed_message(&transaction_bytes) {
        return err!(ErrorCode::MessageMismatch);
    }

    Ok(VerifiedMessage {
        identity: user_op.auth.identity.clone(),
        message: transaction_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::precompile::secp256k1_instruction_data;

    #[test]
    fn parses_single_signature_layout() {
        let data = secp256k1_instruction_data(&[7; 20], &[9; 64], 1, b"hello", 0).unwrap();

        let proof = Secp256k1Keccak256::parse(&data, 0).unwrap();

        assert_eq!(proof.public_key, vec![7; 20]);
        assert_eq!(proof.signature.len(), 65);
        assert_eq!(proof.signature[64], 1);
        assert_eq!(proof.message, b"hello".to_vec());
    }

    #[test]
    fn rejects_multiple_signatures() {
        let mut data = secp256k1_instruction_data(&[7; 20], &[9; 64], 0, b"hello", 0).unwrap();
        data[0] = 2;

        let err = Secp256k1Keccak256::parse(&data, 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::MultipleSignaturesNotSupported));
    }

    #[test]
    fn rejects_offsets_into_other_instructions() {
        let data = secp256k1_instruction_data(&[7; 20], &[9; 64], 0, b"hello", 0).unwrap();

        let err = Secp256k1Keccak256::parse(&data, 1).unwrap_err();
        assert_eq!(err, error!(ErrorCode::DataInOtherInstructionsNotSupported));
    }

    #[test]
    fn rejects_message_past_end_of_data() {
        let mut data = secp256k1_instruction_data(&[7; 20], &[9; 64], 0, b"hello", 0).unwrap();
        let mut offsets = Secp256k1SignatureOffsets::from_bytes(&data[1..12]).unwrap();
        offsets.message_data_size += 1;
        data[1..12].copy_from_slice(&offsets.to_bytes());

        let err = Secp256k1Keccak256::parse(&data, 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidOffsets));
    }

    #[test]
    fn rejects_truncated_offsets_table() {
        let err = Secp256k1Keccak256::parse(&[1, 0, 0], 0).unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidInstructionData));
    }
}
