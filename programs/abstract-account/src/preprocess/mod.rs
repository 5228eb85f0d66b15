//! Client side preparation of the data the program verifies.
//!
//! Nothing here runs on-chain: these helpers turn tokens, keys and signatures into the exact
//! instruction arguments and precompile instructions the program expects.

use thiserror::Error;

pub mod ethereum;
pub mod oidc;
pub mod precompile;
pub mod webauthn;

pub type Result<T> = std::result::Result<T, PreprocessError>;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Unknown issuer: {0}")]
    UnknownIssuer(String),

    #[error("Unknown key id: {0}")]
    UnknownKeyId(String),

    #[error("Invalid length for {what}: expected {expected}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Message of {0} bytes does not fit the precompile offsets")]
    MessageTooLarge(usize),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<anchor_lang::error::Error> for PreprocessError {
    fn from(error: anchor_lang::error::Error) -> Self {
        PreprocessError::Encoding(error.to_string())
    }
}
