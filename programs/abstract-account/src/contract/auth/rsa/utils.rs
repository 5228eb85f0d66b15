use anchor_lang::prelude::*;

use super::constants::{
    registered_key, ProviderKey, FULL_DIGEST_INFO_LENGTH, SHA256_DIGEST_INFO,
    SHA256_DIGEST_INFO_LENGTH,
};
use crate::{
    config::RSA_2048_SIGNATURE_LENGTH, error::ErrorCode, types::identity::oidc::OidcProvider,
};

/// Minimum number of 0xFF padding bytes in an EMSA-PKCS1-v1_5 encoding.
pub const MIN_PKCS1_PADDING_LENGTH: usize = 8;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct OidcVerificationData {
    /// SHA-256 hash of signing input (header.payload)
    pub signing_input_hash: [u8; 32],
    /// RSA signature bytes (256 bytes for 2048-bit keys)
    pub signature: Vec<u8>,
    /// OIDC provider (Google, etc.)
    pub provider: OidcProvider,
    /// Key index for provider's key array
    pub key_index: u8,
}

impl OidcVerificationData {
    /// Checks the shape of the data and resolves the signing key it refers to.
    pub fn validate(&self) -> Result<&'static ProviderKey> {
        if self.signature.is_empty() {
            return err!(ErrorCode::InvalidSignatureFormat);
        }

        if self.signature.len() != RSA_2048_SIGNATURE_LENGTH {
            return err!(ErrorCode::InvalidSignatureLength);
        }

        registered_key(self.provider, self.key_index)
    }
}

/// Left pads a big-endian integer to `len` bytes, `None` if it does not fit.
pub fn left_pad(bytes: &[u8], len: usize) -> Option<Vec<u8>> {
    if bytes.len() > len {
        return None;
    }
    let mut padded = vec![0u8; len - bytes.len()];
    padded.extend_from_slice(bytes);
    Some(padded)
}

/// Returns the SHA-256 digest carried by an EMSA-PKCS1-v1_5 encoded message.
///
/// Expected layout: `0x00 0x01 0xFF.. 0x00 DigestInfo(sha256) digest`, with the
/// message exactly as long as the modulus. Any deviation yields `None`.
pub fn extract_sha256_digest(encoded_message: &[u8]) -> Option<&[u8]> {
    let padding_end = encoded_message
        .len()
        .checked_sub(FULL_DIGEST_INFO_LENGTH + 1)?;

    if padding_end < 2 + MIN_PKCS1_PADDING_LENGTH {
        return None;
    }

    if encoded_message[0] != 0x00 || encoded_message[1] != 0x01 {
        return None;
    }

    if !encoded_message[2..padding_end].iter().all(|&byte| byte == 0xFF) {
        return None;
    }

    if encoded_message[padding_end] != 0x00 {
        return None;
    }

    let digest_info = &encoded_message[padding_end + 1..];
    if &digest_info[..SHA256_DIGEST_INFO_LENGTH] != SHA256_DIGEST_INFO {
        return None;
    }

    Some(&digest_info[SHA256_DIGEST_INFO_LENGTH..])
}

/// Constant-time hash comparison
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.iter()
        .zip(b.iter())
        .fold(0u8, |difference, (x, y)| difference | (x ^ y))
        == 0
}
