use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    instruction::Instruction,
    sysvar::instructions::{load_current_index_checked, load_instruction_at_checked},
};

use crate::error::ErrorCode;

/*
    Cross-checking of Solana's native signature verification programs.

    The precompile runs before the program instruction and aborts the whole transaction if the
    signature is invalid, but it returns nothing. So the program parses the precompile instruction
    data back out of the instructions sysvar and compares what was verified against what it is
    about to trust.

    Reference:

       - https://docs.rs/solana-secp256k1-program/latest/solana_secp256k1_program/
       - https://docs.rs/solana-secp256r1-program/latest/solana_secp256r1_program/
*/

/// Key, signature and message a native verification instruction checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedProof {
    pub public_key: Vec<u8>,
    pub signature: Vec<u8>,
    pub message: Vec<u8>,
}

/// Read access to the instructions of the transaction being executed.
pub trait InstructionSource {
    fn current_index(&self) -> Result<usize>;

    fn instruction_at(&self, index: usize) -> Result<Instruction>;
}

impl InstructionSource for AccountInfo<'_> {
    fn current_index(&self) -> Result<usize> {
        Ok(load_current_index_checked(self)? as usize)
    }

    fn instruction_at(&self, index: usize) -> Result<Instruction> {
        Ok(load_instruction_at_checked(index, self)?)
    }
}

/// A native program whose instruction data layout can be parsed into a [`ParsedProof`].
pub trait NativeSignatureVerifier {
    fn program_id() -> Pubkey;

    /// `instruction_index` is the position of the precompile instruction in the transaction.
    fn parse(data: &[u8], instruction_index: usize) -> Result<ParsedProof>;
}

/// Parses the verification instruction immediately preceding the current one.
pub fn locate_and_parse_external_proof<V: NativeSignatureVerifier>(
    instructions: &impl InstructionSource,
) -> Result<ParsedProof> {
    let current_index = instructions.current_index()?;
    if current_index < 1 {
        return err!(ErrorCode::MissingVerificationInstruction);
    }

    let verification_index = current_index - 1;
    let verification_instruction = instructions.instruction_at(verification_index)?;
    if verification_instruction.program_id != V::program_id() {
        return err!(ErrorCode::InvalidVerificationProgramId);
    }

    V::parse(&verification_instruction.data, verification_index)
}

/// Returns `data[start..start + len]` or `InvalidOffsets` when it falls outside `data`.
pub(crate) fn slice_at(data: &[u8], start: usize, len: usize) -> Result<&[u8]> {
    start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .ok_or_else(|| error!(ErrorCode::InvalidOffsets))
}
