use serde::Serialize;

use super::Result;
use crate::{
    codec,
    contract::auth::webauthn::WEBAUTHN_GET_TYPE,
    traits::signable_message::transaction_challenge,
    types::transaction::transaction::{
        Transaction, VerificationContext, WebAuthnVerificationContext,
    },
};

pub use crate::contract::auth::webauthn::webauthn_signed_message;

/// `CollectedClientData` of an assertion, serialized in the order browsers emit it.
#[derive(Debug, Serialize)]
struct CollectedClientData<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    challenge: &'a str,
    origin: &'a str,
    #[serde(rename = "crossOrigin")]
    cross_origin: bool,
}

pub fn client_data_json(challenge: &str, origin: &str) -> Result<String> {
    Ok(serde_json::to_string(&CollectedClientData {
        kind: WEBAUTHN_GET_TYPE,
        challenge,
        origin,
        cross_origin: false,
    })?)
}

/// Client data for an assertion whose challenge is `transaction`.
pub fn transaction_client_data(transaction: &Transaction, origin: &str) -> Result<String> {
    let challenge = transaction_challenge(&codec::encode(transaction)?);
    client_data_json(&challenge, origin)
}

pub fn webauthn_verification_context(
    authenticator_data: Vec<u8>,
    client_data: String,
) -> VerificationContext {
    VerificationContext::WebAuthn(WebAuthnVerificationContext {
        authenticator_data,
        client_data,
    })
}
