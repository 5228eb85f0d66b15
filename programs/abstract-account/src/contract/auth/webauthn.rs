use anchor_lang::prelude::*;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::error::ErrorCode;

pub const WEBAUTHN_GET_TYPE: &str = "webauthn.get";

/// The fields of `clientDataJSON` the program relies on.
///
/// Reference: https://www.w3.org/TR/webauthn-2/#dictionary-client-data
#[derive(Debug, Deserialize)]
pub struct ClientData {
    #[serde(rename = "type")]
    pub kind: String,
    pub challenge: String,
}

impl ClientData {
    pub fn parse(client_data: &str) -> Result<Self> {
        serde_json::from_str(client_data).map_err(|_| error!(ErrorCode::InvalidClientData))
    }
}

/// `authenticator_data || sha256(client_data)`, the bytes a passkey signs.
pub fn webauthn_signed_message(authenticator_data: &[u8], client_data: &str) -> Vec<u8> {
    let client_data_hash = Sha256::digest(client_data.as_bytes());

    let mut message = Vec::with_capacity(authenticator_data.len() + client_data_hash.len());
    message.extend_from_slice(authenticator_data);
    message.extend_from_slice(&client_data_hash);
    message
}

/// Checks the client data is an assertion over `expected_challenge`.
pub fn verify_client_data(client_data: &str, expected_challenge: &str) -> Result<()> {
    let client_data = ClientData::parse(client_data)?;

    require!(
        client_data.kind == WEBAUTHN_GET_TYPE,
        ErrorCode::InvalidClientData
    );
    require!(
        client_data.challenge == expected_challenge,
        ErrorCode::ChallengeMismatch
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_DATA: &str = r#"{"type":"webauthn.get","challenge":"abc","origin":"http://localhost:3000","crossOrigin":false}"#;

    #[test]
    fn signed_message_appends_client_data_hash() {
        let authenticator_data = [0x49u8; 37];

        let message = webauthn_signed_message(&authenticator_data, CLIENT_DATA);

        assert_eq!(message.len(), 37 + 32);
        assert_eq!(&message[..37], &authenticator_data);
        assert_eq!(&message[37..], Sha256::digest(CLIENT_DATA.as_bytes()).as_slice());
    }

    #[test]
    fn accepts_matching_challenge() {
        verify_client_data(CLIENT_DATA, "abc").unwrap();
    }

    #[test]
    fn rejects_other_challenge() {
        let err = verify_client_data(CLIENT_DATA, "abd").unwrap_err();
        assert_eq!(err, error!(ErrorCode::ChallengeMismatch));
    }

    #[test]
    fn rejects_registration_ceremony() {
        let client_data = r#"{"type":"webauthn.create","challenge":"abc"}"#;

        let err = verify_client_data(client_data, "abc").unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidClientData));
    }

    #[test]
    fn rejects_non_json() {
        let err = verify_client_data("not json", "abc").unwrap_err();
        assert_eq!(err, error!(ErrorCode::InvalidClientData));
    }
}
