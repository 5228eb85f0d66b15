/// Exponent bits consumed by a single `continue_rsa_verification` call.
///
/// Each bit costs one 2048-bit modular squaring plus, for set bits, one
/// modular multiplication. Raise it on clusters with a higher compute ceiling.
pub const MODPOW_BITS_PER_STEP: u32 = 2;

/// Signature and modulus length of the supported RSA keys, in bytes.
pub const RSA_2048_SIGNATURE_LENGTH: usize = 256;

/// Public exponents longer than this are rejected when seeding a checkpoint.
pub const MAX_RSA_EXPONENT_LENGTH: usize = 8;

/// Upper bound of `continue` calls needed for a modulus of `modulus_bits`.
///
/// The exponent never has more significant bits than the modulus, so the
/// bound holds for every registered key.
pub const fn max_modpow_steps(modulus_bits: u32, bits_per_step: u32) -> u32 {
    let bits_per_step = if bits_per_step == 0 { 1 } else { bits_per_step };
    modulus_bits.div_ceil(bits_per_step)
}
