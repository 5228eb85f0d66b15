use crate::types::identity::Identity;

pub mod oidc;
pub mod precompile;
pub mod rsa;
pub mod secp256k1_keccak256;
pub mod secp256r1_sha256;
pub mod signature_check;
pub mod webauthn;

/// An identity together with the canonical transaction bytes it proved to have signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedMessage {
    pub identity: Identity,
    pub message: Vec<u8>,
}
