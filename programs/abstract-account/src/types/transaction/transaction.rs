use anchor_lang::prelude::*;

use crate::types::{
    account::{AccountId, Nonce},
    identity::{Identity, IdentityWithPermissions},
};

/// Everything an `execute_*` instruction needs besides the accounts.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct UserOp {
    pub auth: Auth,
    pub transaction: Transaction,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct Auth {
    /*
    Identity claimed by the caller.

    It is never trusted on its own, the verifier compares it against what was actually proven:

    - Wallet: key bytes parsed from the secp256k1/secp256r1 precompile instruction
    - WebAuthn: public key parsed from the secp256r1 precompile instruction
    - OIDC: provider and `sub` claim of the ID token whose RSA signature was verified
    */
    pub identity: Identity,

    /*
    Extra data necessary to compute the signed bytes.

    - Wallet: Not necessary as the signed message is derived from the transaction
    - WebAuthn: Necessary as the signed message is authenticator_data || sha256(client_data)
    - OIDC: Necessary as the signed message is the token header and payload
    */
    pub verification_context: Option<VerificationContext>,
}

/*
Transaction to be executed by the abstract account.

The canonical encoding of this struct is the exact byte sequence that is signed:

- Wallet: signed directly (Ethereum wallets sign it with the personal message prefix)
- WebAuthn: sha256 of it is the client_data challenge
- OIDC: sha256 of it is the ID token nonce
*/
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub account_id: AccountId,
    pub nonce: Nonce,
    pub action: Action,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    RemoveAccount,
    AddIdentity(IdentityWithPermissions),
    RemoveIdentity(Identity),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::RemoveAccount => "remove_account",
            Action::AddIdentity(_) => "add_identity",
            Action::RemoveIdentity(_) => "remove_identity",
        }
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub enum VerificationContext {
    WebAuthn(WebAuthnVerificationContext),
    Oidc(OidcVerificationContext),
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct WebAuthnVerificationContext {
    pub authenticator_data: Vec<u8>,
    /*
    JSON client data exactly as produced by the authenticator.

    Kept as a string since the authenticator signs sha256 over its raw bytes, any re-serialization would change the hash.
    */
    pub client_data: String,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct OidcVerificationContext {
    /// base64url encoded JWT header segment
    pub header: String,
    /// base64url encoded JWT payload segment
    pub payload: String,
}
