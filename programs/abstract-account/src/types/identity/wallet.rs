use anchor_lang::prelude::*;

#[derive(Debug, AnchorDeserialize, AnchorSerialize, PartialEq, Eq, Clone)]
pub enum WalletType {
    /// Address derived from a secp256k1 key: last 20 bytes of keccak256(pubkey).
    Ethereum([u8; 20]),
    /// SEC1 compressed secp256r1 public key.
    Secp256r1([u8; 33]),
}

impl WalletType {
    /// Key bytes the signature precompile reports for this wallet.
    pub fn key_bytes(&self) -> &[u8] {
        match self {
            WalletType::Ethereum(address) => address,
            WalletType::Secp256r1(public_key) => public_key,
        }
    }
}
