use anchor_lang::prelude::ProgramError;
use anchor_lang::solana_program::{instruction::Instruction, secp256k1_program};
use rsa::BigUint;

use super::{PreprocessError, Result};
use crate::contract::auth::{
    precompile::InstructionSource,
    secp256k1_keccak256::{
        Secp256k1SignatureOffsets, ETH_ADDRESS_SIZE, RECOVERY_ID_SIZE,
        SIGNATURE_OFFSETS_SERIALIZED_SIZE, SIGNATURE_OFFSETS_START as SECP256K1_OFFSETS_START,
    },
    secp256r1_sha256::{
        Secp256r1SignatureOffsets, COMPRESSED_PUBKEY_SERIALIZED_SIZE, CURRENT_INSTRUCTION,
        DATA_START as SECP256R1_DATA_START, SECP256R1_PROGRAM_ID, SIGNATURE_SERIALIZED_SIZE,
    },
};

/// Order of the P-256 group.
pub const SECP256R1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xBC, 0xE6, 0xFA, 0xAD, 0xA7, 0x17, 0x9E, 0x84, 0xF3, 0xB9, 0xCA, 0xC2, 0xFC, 0x63, 0x25, 0x51,
];

fn offset(value: usize) -> Result<u16> {
    u16::try_from(value).map_err(|_| PreprocessError::MessageTooLarge(value))
}

/// Data of a secp256k1 precompile instruction verifying one signature.
///
/// Layout: count | offsets | eth_address | signature | recovery_id | message.
/// `instruction_index` is the position the instruction will have in the transaction.
pub fn secp256k1_instruction_data(
    eth_address: &[u8; 20],
    signature: &[u8; 64],
    recovery_id: u8,
    message: &[u8],
    instruction_index: u8,
) -> Result<Vec<u8>> {
    let eth_address_offset = SECP256K1_OFFSETS_START + SIGNATURE_OFFSETS_SERIALIZED_SIZE;
    let signature_offset = eth_address_offset + ETH_ADDRESS_SIZE;
    let message_data_offset = signature_offset + SIGNATURE_SERIALIZED_SIZE + RECOVERY_ID_SIZE;

    let offsets = Secp256k1SignatureOffsets {
        signature_offset: offset(signature_offset)?,
        signature_instruction_index: instruction_index,
        eth_address_offset: offset(eth_address_offset)?,
        eth_address_instruction_index: instruction_index,
        message_data_offset: offset(message_data_offset)?,
        message_data_size: offset(message.len())?,
        message_instruction_index: instruction_index,
    };
    offset(message_data_offset + message.len())?;

    let mut data = Vec::with_capacity(message_data_offset + message.len());
    data.push(1);
    data.extend_from_slice(&offsets.to_bytes());
    data.extend_from_slice(eth_address);
    data.extend_from_slice(signature);
    data.push(recovery_id);
    data.extend_from_slice(message);
    Ok(data)
}

pub fn secp256k1_instruction(
    eth_address: &[u8; 20],
    signature: &[u8; 64],
    recovery_id: u8,
    message: &[u8],
    instruction_index: u8,
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: secp256k1_program::id(),
        accounts: vec![],
        data: secp256k1_instruction_data(
            eth_address,
            signature,
            recovery_id,
            message,
            instruction_index,
        )?,
    })
}

/// Data of a secp256r1 precompile instruction verifying one signature.
///
/// Layout: count | padding | offsets | signature | public_key | message, every
/// instruction index set to "this instruction".
pub fn secp256r1_instruction_data(
    signature: &[u8; 64],
    public_key: &[u8; 33],
    message: &[u8],
) -> Result<Vec<u8>> {
    let signature_offset = SECP256R1_DATA_START;
    let public_key_offset = signature_offset + SIGNATURE_SERIALIZED_SIZE;
    let message_data_offset = public_key_offset + COMPRESSED_PUBKEY_SERIALIZED_SIZE;

    let offsets = Secp256r1SignatureOffsets {
        signature_offset: offset(signature_offset)?,
        signature_instruction_index: CURRENT_INSTRUCTION,
        public_key_offset: offset(public_key_offset)?,
        public_key_instruction_index: CURRENT_INSTRUCTION,
        message_data_offset: offset(message_data_offset)?,
        message_data_size: offset(message.len())?,
        message_instruction_index: CURRENT_INSTRUCTION,
    };
    offset(message_data_offset + message.len())?;

    let mut data = Vec::with_capacity(message_data_offset + message.len());
    data.push(1);
    data.push(0);
    data.extend_from_slice(bytemuck::bytes_of(&offsets));
    data.extend_from_slice(signature);
    data.extend_from_slice(public_key);
    data.extend_from_slice(message);
    Ok(data)
}

pub fn secp256r1_instruction(
    signature: &[u8; 64],
    public_key: &[u8; 33],
    message: &[u8],
) -> Result<Instruction> {
    Ok(Instruction {
        program_id: SECP256R1_PROGRAM_ID,
        accounts: vec![],
        data: secp256r1_instruction_data(signature, public_key, message)?,
    })
}

/// Whether `s` of an `r || s` P-256 signature is at most half the group order.
pub fn is_low_s(signature: &[u8; 64]) -> bool {
    let order = BigUint::from_bytes_be(&SECP256R1_ORDER);
    BigUint::from_bytes_be(&signature[32..]) <= order >> 1
}

/// Replaces `s` by `n - s` when it is in the upper half, the precompile only accepts low-s.
pub fn normalize_low_s(signature: &[u8; 64]) -> [u8; 64] {
    if is_low_s(signature) {
        return *signature;
    }

    let order = BigUint::from_bytes_be(&SECP256R1_ORDER);
    let s = BigUint::from_bytes_be(&signature[32..]);
    let low_s = (order - s).to_bytes_be();

    let mut normalized = *signature;
    normalized[32..].fill(0);
    normalized[64 - low_s.len()..].copy_from_slice(&low_s);
    normalized
}

/// In-memory stand-in for the instructions sysvar.
///
/// Lets a client run the program's cross-checks against the instructions it is
/// about to submit.
#[derive(Debug, Clone, Default)]
pub struct InstructionBundle {
    instructions: Vec<Instruction>,
    current_index: usize,
}

impl InstructionBundle {
    pub fn new(instructions: Vec<Instruction>, current_index: usize) -> Self {
        Self {
            instructions,
            current_index,
        }
    }

    /// The program instruction runs right after `preceding`.
    pub fn following(preceding: Vec<Instruction>) -> Self {
        let current_index = preceding.len();
        Self::new(preceding, current_index)
    }
}

impl InstructionSource for InstructionBundle {
    fn current_index(&self) -> anchor_lang::Result<usize> {
        Ok(self.current_index)
    }

    fn instruction_at(&self, index: usize) -> anchor_lang::Result<Instruction> {
        self.instructions
            .get(index)
            .cloned()
            .ok_or_else(|| ProgramError::InvalidArgument.into())
    }
}
