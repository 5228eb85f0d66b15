use anchor_lang::prelude::*;

#[derive(Debug, AnchorSerialize, AnchorDeserialize, PartialEq, Eq, Clone)]
pub struct WebAuthnAuthenticator {
    pub key_id: String,
    // The public key cannot be recovered while signing with a passkey.
    // It must be captured at credential creation and stored with the identity.
    pub compressed_public_key: [u8; 33],
}
