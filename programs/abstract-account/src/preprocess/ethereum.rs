use sha3::{Digest, Keccak256};

use super::{PreprocessError, Result};
use crate::{
    traits::signable_message::{MessageFormat, SignableMessage},
    types::transaction::transaction::Transaction,
};

/// Ethereum address of a secp256k1 public key.
///
/// Accepts the 65 byte SEC1 uncompressed encoding or the bare 64 byte point.
pub fn ethereum_address(uncompressed_public_key: &[u8]) -> Result<[u8; 20]> {
    let point = match uncompressed_public_key {
        [0x04, point @ ..] if point.len() == 64 => point,
        point if point.len() == 64 => point,
        _ => {
            return Err(PreprocessError::InvalidLength {
                what: "uncompressed public key",
                expected: 65,
                actual: uncompressed_public_key.len(),
            })
        }
    };

    let hash = Keccak256::digest(point);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    Ok(address)
}

/// Bytes an Ethereum wallet must `personal_sign` to authorize `transaction`.
pub fn personal_sign_message(transaction: &Transaction) -> Result<Vec<u8>> {
    Ok(transaction.to_signable_message(MessageFormat::EthereumPersonal)?)
}
