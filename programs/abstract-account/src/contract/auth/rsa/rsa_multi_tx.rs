use anchor_lang::prelude::*;
use rsa::BigUint;

use super::{
    constants::RsaKeyComponents,
    utils::{constant_time_compare, extract_sha256_digest, left_pad, OidcVerificationData},
};
use crate::{
    config::{
        max_modpow_steps, MAX_RSA_EXPONENT_LENGTH, MODPOW_BITS_PER_STEP,
        RSA_2048_SIGNATURE_LENGTH,
    },
    error::ErrorCode,
    pda_seeds::RSA_MODPOW_SEED,
    types::identity::oidc::OidcProvider,
};

/// Caller chosen identifier, unique per owner.
pub type OperationId = [u8; 32];

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModpowPhase {
    #[default]
    Uninitialized,
    Active,
    Complete,
    Closed,
}

/**
* Checkpoint of a `signature^e mod n` computation spread over several transactions.
*
* - The exponent is consumed left to right (square-and-multiply), `next_bit` counts processed bits
* - Integers are stored big-endian, `accumulator` starts at 1
* - The PDA is derived from the owner, so an operation can only be driven by the signer that created it
*/
#[account]
#[derive(Debug, Default)]
pub struct ModpowState {
    pub owner: Pubkey,
    pub operation_id: OperationId,
    pub phase: ModpowPhase,

    // Recorded at init, finalize must present the same values
    pub provider: OidcProvider,
    pub key_index: u8,
    pub signing_input_hash: [u8; 32],

    pub base: Vec<u8>,
    pub modulus: Vec<u8>,
    pub exponent: Vec<u8>,
    pub accumulator: Vec<u8>,

    pub next_bit: u32,
    pub total_bits: u32,
    pub steps_taken: u32,

    pub bump: u8,
}

impl ModpowState {
    const DISCRIMINATOR_SIZE: usize = 8;
    const PUBKEY_SIZE: usize = 32;
    const OPERATION_ID_SIZE: usize = 32;
    const ENUM_TAG_SIZE: usize = 1;
    const U8_SIZE: usize = 1;
    const HASH_SIZE: usize = 32;
    const VEC_PREFIX_SIZE: usize = 4;
    const U32_SIZE: usize = 4;

    pub const SPACE: usize = Self::DISCRIMINATOR_SIZE
        + Self::PUBKEY_SIZE
        + Self::OPERATION_ID_SIZE
        + Self::ENUM_TAG_SIZE // phase
        + Self::ENUM_TAG_SIZE // provider
        + Self::U8_SIZE // key_index
        + Self::HASH_SIZE
        + Self::VEC_PREFIX_SIZE + RSA_2048_SIGNATURE_LENGTH // base
        + Self::VEC_PREFIX_SIZE + RSA_2048_SIGNATURE_LENGTH // modulus
        + Self::VEC_PREFIX_SIZE + MAX_RSA_EXPONENT_LENGTH // exponent
        + Self::VEC_PREFIX_SIZE + RSA_2048_SIGNATURE_LENGTH // accumulator
        + Self::U32_SIZE * 3 // next_bit + total_bits + steps_taken
        + Self::U8_SIZE; // bump

    /// Seeds a fresh checkpoint: `base = signature`, `accumulator = 1`.
    pub fn begin(
        &mut self,
        owner: Pubkey,
        operation_id: OperationId,
        verification_data: &OidcVerificationData,
        key: &RsaKeyComponents,
        bump: u8,
    ) -> Result<()> {
        require!(
            self.phase == ModpowPhase::Uninitialized,
            ErrorCode::OperationAlreadyExists
        );

        let exponent = key.exponent.to_bytes_be();
        require!(
            key.modulus_len() == RSA_2048_SIGNATURE_LENGTH
                && exponent.len() <= MAX_RSA_EXPONENT_LENGTH,
            ErrorCode::InvalidPublicKey
        );
        require!(
            verification_data.signature.len() == RSA_2048_SIGNATURE_LENGTH,
            ErrorCode::InvalidSignatureLength
        );

        let total_bits = key.exponent.bits() as u32;

        *self = Self {
            owner,
            operation_id,
            phase: if total_bits == 0 {
                ModpowPhase::Complete
            } else {
                ModpowPhase::Active
            },
            provider: verification_data.provider,
            key_index: verification_data.key_index,
            signing_input_hash: verification_data.signing_input_hash,
            base: verification_data.signature.clone(),
            modulus: key.modulus.to_bytes_be(),
            exponent,
            accumulator: vec![1],
            next_bit: 0,
            total_bits,
            steps_taken: 0,
            bump,
        };

        Ok(())
    }

    /// Processes up to `bits_per_step` exponent bits. Returns whether the
    /// exponentiation is complete, a complete state is left untouched.
    pub fn advance(&mut self, owner: &Pubkey, bits_per_step: u32) -> Result<bool> {
        self.ensure_live(owner)?;

        if self.phase == ModpowPhase::Complete {
            return Ok(true);
        }

        require!(
            self.steps_taken < self.max_steps(bits_per_step),
            ErrorCode::StepBudgetExhausted
        );

        let modulus = BigUint::from_bytes_be(&self.modulus);
        let base = BigUint::from_bytes_be(&self.base) % &modulus;
        let mut accumulator = BigUint::from_bytes_be(&self.accumulator);

        let end = self
            .next_bit
            .saturating_add(bits_per_step.max(1))
            .min(self.total_bits);

        for bit in self.next_bit..end {
            accumulator = (&accumulator * &accumulator) % &modulus;
            if self.exponent_bit(bit) {
                accumulator = (accumulator * &base) % &modulus;
            }
        }

        self.accumulator = accumulator.to_bytes_be();
        self.next_bit = end;
        self.steps_taken += 1;

        if self.next_bit >= self.total_bits {
            self.phase = ModpowPhase::Complete;
        }

        Ok(self.phase == ModpowPhase::Complete)
    }

    /// Compares the completed `signature^e mod n` against the hash it must carry.
    ///
    /// A signature that does not verify is `Ok(false)`, errors are reserved
    /// for misuse of the checkpoint.
    pub fn finalize(
        &self,
        owner: &Pubkey,
        verification_data: &OidcVerificationData,
    ) -> Result<bool> {
        self.ensure_complete(owner)?;

        require!(
            verification_data.provider == self.provider
                && verification_data.key_index == self.key_index
                && verification_data.signing_input_hash == self.signing_input_hash
                && verification_data.signature == self.base,
            ErrorCode::VerificationDataMismatch
        );

        Ok(self.signature_matches(&self.signing_input_hash))
    }

    pub fn signature_matches(&self, expected_hash: &[u8]) -> bool {
        if self.phase != ModpowPhase::Complete {
            return false;
        }

        // RSAVP1 requires the signature representative to be below the modulus
        if BigUint::from_bytes_be(&self.base) >= BigUint::from_bytes_be(&self.modulus) {
            return false;
        }

        let Some(encoded_message) = left_pad(&self.accumulator, self.modulus.len()) else {
            return false;
        };

        extract_sha256_digest(&encoded_message)
            .is_some_and(|digest| constant_time_compare(digest, expected_hash))
    }

    pub fn release(&mut self, owner: &Pubkey) -> Result<()> {
        self.ensure_live(owner)?;
        self.phase = ModpowPhase::Closed;
        Ok(())
    }

    /// Fails unless `owner` drives this operation and it has reached `Complete`.
    pub fn ensure_complete(&self, owner: &Pubkey) -> Result<()> {
        self.ensure_live(owner)?;
        require!(
            self.phase == ModpowPhase::Complete,
            ErrorCode::StateNotComplete
        );
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.phase == ModpowPhase::Complete
    }

    /// Worst case number of `advance` calls for this modulus.
    pub fn max_steps(&self, bits_per_step: u32) -> u32 {
        max_modpow_steps((self.modulus.len() * 8) as u32, bits_per_step)
    }

    fn ensure_live(&self, owner: &Pubkey) -> Result<()> {
        require!(
            self.phase != ModpowPhase::Uninitialized,
            ErrorCode::OperationNotInitialized
        );
        require_keys_eq!(self.owner, *owner, ErrorCode::NotOwner);
        require!(self.phase != ModpowPhase::Closed, ErrorCode::AlreadyClosed);
        Ok(())
    }

    /// Exponent bit at `index`, counting from the most significant one.
    fn exponent_bit(&self, index: u32) -> bool {
        let position = (self.total_bits - 1 - index) as usize;
        let byte = self.exponent[self.exponent.len() - 1 - position / 8];
        (byte >> (position % 8)) & 1 == 1
    }
}

pub fn init_rsa_verification_impl(
    ctx: Context<InitRsaVerification>,
    operation_id: OperationId,
    verification_data: OidcVerificationData,
) -> Result<()> {
    let provider_key = verification_data.validate()?;
    let key = RsaKeyComponents::from_pkcs1_der(provider_key.der)?;

    let owner = ctx.accounts.payer.key();
    let state = &mut ctx.accounts.modpow_state;
    state.begin(
        owner,
        operation_id,
        &verification_data,
        &key,
        ctx.bumps.modpow_state,
    )?;

    msg!(
        "Initialized RSA verification with {} exponent bits (kid {})",
        state.total_bits,
        provider_key.kid
    );
    Ok(())
}

pub fn continue_rsa_verification_impl(ctx: Context<ContinueRsaVerification>) -> Result<bool> {
    let owner = ctx.accounts.payer.key();
    let state = &mut ctx.accounts.modpow_state;

    if state.is_complete() {
        msg!("RSA modpow already complete");
        return Ok(true);
    }

    let is_complete = state.advance(&owner, MODPOW_BITS_PER_STEP)?;

    if is_complete {
        msg!(
            "RSA modpow completed after {} steps ({} bits)",
            state.steps_taken,
            state.total_bits
        );
    } else {
        msg!(
            "Processed bits {}/{} (step {})",
            state.next_bit,
            state.total_bits,
            state.steps_taken
        );
    }

    Ok(is_complete)
}

pub fn finalize_rsa_verification_impl(
    ctx: Context<FinalizeRsaVerification>,
    verification_data: OidcVerificationData,
) -> Result<bool> {
    let verified = ctx
        .accounts
        .modpow_state
        .finalize(&ctx.accounts.payer.key(), &verification_data)?;

    msg!("RSA signature verification result: {}", verified);
    Ok(verified)
}

pub fn cleanup_rsa_verification_impl(ctx: Context<CleanupRsaVerification>) -> Result<()> {
    let owner = ctx.accounts.payer.key();
    ctx.accounts.modpow_state.release(&owner)?;

    msg!("Cleaned up RSA verification state");
    Ok(())
}

#[derive(Accounts)]
#[instruction(operation_id: OperationId)]
pub struct InitRsaVerification<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    // An existing live operation is rejected by `begin` with OperationAlreadyExists
    #[account(
        init_if_needed,
        payer = payer,
        space = ModpowState::SPACE,
        seeds = [
            RSA_MODPOW_SEED,
            payer.key().as_ref(),
            operation_id.as_ref()
        ],
        bump
    )]
    pub modpow_state: Account<'info, ModpowState>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(operation_id: OperationId)]
pub struct ContinueRsaVerification<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [
            RSA_MODPOW_SEED,
            payer.key().as_ref(),
            operation_id.as_ref()
        ],
        bump = modpow_state.bump
    )]
    pub modpow_state: Account<'info, ModpowState>,
}

#[derive(Accounts)]
#[instruction(operation_id: OperationId)]
pub struct FinalizeRsaVerification<'info> {
    pub payer: Signer<'info>,

    #[account(
        seeds = [
            RSA_MODPOW_SEED,
            payer.key().as_ref(),
            operation_id.as_ref()
        ],
        bump = modpow_state.bump
    )]
    pub modpow_state: Account<'info, ModpowState>,
}

#[derive(Accounts)]
#[instruction(operation_id: OperationId)]
pub struct CleanupRsaVerification<'info> {
    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        seeds = [
            RSA_MODPOW_SEED,
            payer.key().as_ref(),
            operation_id.as_ref()
        ],
        bump = modpow_state.bump,
        close = payer
    )]
    pub modpow_state: Account<'info, ModpowState>,
}
