use anchor_lang::prelude::*;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{de::DeserializeOwned, Deserialize};
use sha2::{Digest, Sha256};

use super::{
    rsa::{constants::registered_key, rsa_multi_tx::ModpowState},
    VerifiedMessage,
};
use crate::{
    codec,
    error::ErrorCode,
    traits::signable_message::transaction_challenge,
    types::{
        identity::Identity,
        transaction::transaction::{UserOp, VerificationContext},
    },
};

pub const RS256: &str = "RS256";

#[derive(Debug, Clone, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub kid: String,
}

/// ID token claims checked on-chain. Audience and expiry are left to the relying party.
#[derive(Debug, Clone, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    pub sub: String,
    #[serde(default)]
    pub nonce: Option<String>,
}

/// Decodes a base64url JSON segment of a compact JWS.
pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Result<T> {
    let json = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| error!(ErrorCode::InvalidIdToken))?;

    serde_json::from_slice(&json).map_err(|_| error!(ErrorCode::InvalidIdToken))
}

/// SHA-256 of `header.payload`, the bytes an RS256 signature covers.
pub fn signing_input_hash(header: &str, payload: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(header.as_bytes());
    hasher.update(b".");
    hasher.update(payload.as_bytes());
    hasher.finalize().into()
}

/// Proves `user_op.transaction` was authorized by the OIDC identity it claims.
///
/// `state` must be a completed RSA checkpoint driven by `owner`. The token
/// segments in the verification context are bound to it through the signing
/// input hash, then the claims are bound to the identity and the transaction.
pub fn verify_oidc(
    state: &ModpowState,
    owner: &Pubkey,
    user_op: &UserOp,
) -> Result<VerifiedMessage> {
    let Identity::Oidc(authenticator) = &user_op.auth.identity else {
        return err!(ErrorCode::UnsupportedIdentity);
    };

    let Some(VerificationContext::Oidc(context)) = &user_op.auth.verification_context else {
        return err!(ErrorCode::MissingVerificationContext);
    };

    state.ensure_complete(owner)?;

    let hash = signing_input_hash(&context.header, &context.payload);
    if hash != state.signing_input_hash {
        return err!(ErrorCode::MessageMismatch);
    }

    if !state.signature_matches(&hash) {
        return err!(ErrorCode::SignatureVerificationFailed);
    }

    let header: JwtHeader = decode_segment(&context.header)?;
    if header.alg != RS256 {
        return err!(ErrorCode::UnsupportedAlgorithm);
    }

    // The signature was checked with the key at `state.key_index`, the token must name that key.
    if header.kid != registered_key(state.provider, state.key_index)?.kid {
        return err!(ErrorCode::VerificationDataMismatch);
    }

    let claims: IdTokenClaims = decode_segment(&context.payload)?;
    if !state.provider.accepts_issuer(&claims.iss) {
        return err!(ErrorCode::IssuerMismatch);
    }

    if authenticator.provider != state.provider || authenticator.subject != claims.sub {
        return err!(ErrorCode::KeyMismatch);
    }

    let transaction_bytes = codec::encode(&user_op.transaction)?;
    if claims.nonce.as_deref() != Some(transaction_challenge(&transaction_bytes).as_str()) {
        return err!(ErrorCode::ChallengeMismatch);
    }

    Ok(VerifiedMessage {
        identity: user_op.auth.identity.clone(),
        message: transaction_bytes,
    })
}
