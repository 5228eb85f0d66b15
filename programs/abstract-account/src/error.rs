use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Canonical encoding
    #[msg("Input ended before the value was fully decoded")]
    TruncatedInput,
    #[msg("Unknown enum discriminant")]
    UnknownDiscriminant,
    #[msg("Trailing bytes after decoded value")]
    TrailingBytes,
    #[msg("Malformed encoding")]
    MalformedEncoding,
    #[msg("Failed to encode value")]
    EncodingFailed,

    // Precompile cross-check
    #[msg("Missing signature verification instruction")]
    MissingVerificationInstruction,
    #[msg("Invalid verification instruction program ID")]
    InvalidVerificationProgramId,
    #[msg("Invalid instruction data format")]
    InvalidInstructionData,
    #[msg("Multiple signatures not supported")]
    MultipleSignaturesNotSupported,
    #[msg("Data in other instructions not supported")]
    DataInOtherInstructionsNotSupported,
    #[msg("Invalid offsets in instruction data")]
    InvalidOffsets,
    #[msg("Public key mismatch")]
    KeyMismatch,
    #[msg("Message mismatch")]
    MessageMismatch,
    #[msg("Challenge does not match the transaction")]
    ChallengeMismatch,
    #[msg("Invalid WebAuthn client data")]
    InvalidClientData,
    #[msg("Missing verification context")]
    MissingVerificationContext,
    #[msg("Identity kind not supported by this verification method")]
    UnsupportedIdentity,

    // RSA / OIDC
    #[msg("Unknown key id")]
    UnknownKeyId,
    #[msg("Invalid signature length")]
    InvalidSignatureLength,
    #[msg("Invalid signature format")]
    InvalidSignatureFormat,
    #[msg("Invalid RSA public key")]
    InvalidPublicKey,
    #[msg("Modpow operation not complete")]
    StateNotComplete,
    #[msg("Verification data mismatch")]
    VerificationDataMismatch,
    #[msg("Signature verification failed")]
    SignatureVerificationFailed,
    #[msg("Invalid ID token")]
    InvalidIdToken,
    #[msg("Unsupported token algorithm")]
    UnsupportedAlgorithm,
    #[msg("Token issuer does not belong to the provider")]
    IssuerMismatch,

    // Authorization
    #[msg("Account id mismatch")]
    AccountIdMismatch,
    #[msg("Nonce mismatch")]
    NonceMismatch,
    #[msg("Identity not found in account")]
    IdentityNotFound,
    #[msg("Identity is not permitted to act on this account")]
    ActingNotPermitted,
    #[msg("Identity already registered on account")]
    IdentityAlreadyExists,
    #[msg("Cannot remove the last identity of an account")]
    CannotRemoveLastIdentity,
    #[msg("Cannot remove the primary identity of an account")]
    CannotRemovePrimaryIdentity,
    #[msg("Nonce overflow")]
    NonceOverflow,
    #[msg("Account id overflow")]
    AccountIdOverflow,
    #[msg("Signer is not the contract authority")]
    NotContractAuthority,
    #[msg("Account ids were already issued, the counter must be kept")]
    AccountIdsAlreadyIssued,

    // Checkpoint lifecycle
    #[msg("Modpow operation already exists")]
    OperationAlreadyExists,
    #[msg("Modpow operation not initialized")]
    OperationNotInitialized,
    #[msg("Modpow operation already closed")]
    AlreadyClosed,
    #[msg("Signer does not own this operation")]
    NotOwner,
    #[msg("Modpow step budget exhausted")]
    StepBudgetExhausted,
}
