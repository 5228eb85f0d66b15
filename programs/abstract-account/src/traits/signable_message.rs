use anchor_lang::prelude::*;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use sha2::{Digest, Sha256};

use crate::{codec, types::transaction::transaction::Transaction};

const ETHEREUM_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n";

/// How the signer wraps the canonical bytes before signing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFormat {
    /// The canonical bytes are signed as-is.
    Raw,
    /// EIP-191 personal message, as produced by `personal_sign`.
    EthereumPersonal,
}

// Raw message allows direct signature verification by wallets and other auth methods
pub trait SignableMessage {
    type Context<'a>;

    fn to_signable_message(&self, context: Self::Context<'_>) -> Result<Vec<u8>>;
}

impl SignableMessage for Transaction {
    type Context<'a> = MessageFormat;

    fn to_signable_message(&self, format: MessageFormat) -> Result<Vec<u8>> {
        let bytes = codec::encode(self)?;
        Ok(match format {
            MessageFormat::Raw => bytes,
            MessageFormat::EthereumPersonal => ethereum_signed_message(&bytes),
        })
    }
}

/// `"\x19Ethereum Signed Message:\n" || decimal(len(message)) || message`
pub fn ethereum_signed_message(message: &[u8]) -> Vec<u8> {
    let length = message.len().to_string();
    let mut prefixed =
        Vec::with_capacity(ETHEREUM_MESSAGE_PREFIX.len() + length.len() + message.len());
    prefixed.extend_from_slice(ETHEREUM_MESSAGE_PREFIX);
    prefixed.extend_from_slice(length.as_bytes());
    prefixed.extend_from_slice(message);
    prefixed
}

/// base64url (unpadded) SHA-256 of the canonical transaction bytes.
///
/// Carried as the WebAuthn `challenge` and as the OIDC `nonce` claim.
pub fn transaction_challenge(transaction_bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(transaction_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::transaction::transaction::Action;

    #[test]
    fn ethereum_prefix_uses_decimal_length() {
        let message = ethereum_signed_message(&[0u8; 42]);

        assert!(message.starts_with(b"\x19Ethereum Signed Message:\n42"));
        assert_eq!(message.len(), 26 + 2 + 42);
    }

    #[test]
    fn raw_format_is_canonical_encoding() {
        let transaction = Transaction {
            account_id: 1,
            nonce: 2,
            action: Action::RemoveAccount,
        };

        let raw = transaction.to_signable_message(MessageFormat::Raw).unwrap();
        let personal = transaction
            .to_signable_message(MessageFormat::EthereumPersonal)
            .unwrap();

        assert_eq!(raw, codec::encode(&transaction).unwrap());
        assert!(personal.ends_with(&raw));
        assert!(personal.starts_with(b"\x19Ethereum Signed Message:\n25"));
    }

    #[test]
    fn challenge_is_unpadded_base64url_sha256() {
        // sha256("abc")
        assert_eq!(
            transaction_challenge(b"abc"),
            "ungWv48Bz-pBQUDeXa4iI7ADYaOWF3qctBD_YfIAFa0"
        );
    }
}
