use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::de::DeserializeOwned;

use super::{PreprocessError, Result};
use crate::{
    config::RSA_2048_SIGNATURE_LENGTH,
    contract::auth::{
        oidc::{signing_input_hash, IdTokenClaims, JwtHeader, RS256},
        rsa::{constants::key_index_for_kid, utils::OidcVerificationData},
    },
    types::{
        identity::{
            oidc::{OidcAuthenticator, OidcProvider},
            Identity,
        },
        transaction::transaction::{
            Auth, OidcVerificationContext, Transaction, UserOp, VerificationContext,
        },
    },
};

/// An ID token split into what the engine consumes and what the execution carries.
#[derive(Debug, Clone)]
pub struct PreparedOidcToken {
    /// Argument of `init_rsa_verification` and `finalize_rsa_verification`.
    pub verification_data: OidcVerificationData,
    pub context: OidcVerificationContext,
    pub claims: IdTokenClaims,
}

impl PreparedOidcToken {
    pub fn identity(&self) -> Identity {
        Identity::Oidc(OidcAuthenticator {
            provider: self.verification_data.provider,
            subject: self.claims.sub.clone(),
        })
    }

    /// `UserOp` for `execute_oidc`, authenticated by this token.
    pub fn user_op(&self, transaction: Transaction) -> UserOp {
        UserOp {
            auth: Auth {
                identity: self.identity(),
                verification_context: Some(VerificationContext::Oidc(self.context.clone())),
            },
            transaction,
        }
    }
}

fn decode_json<T: DeserializeOwned>(segment: &str) -> Result<T> {
    Ok(serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment)?)?)
}

/// Prepares a compact RS256 ID token for on-chain verification.
///
/// Only the provider registry is consulted, the signature itself is left to the program.
pub fn prepare_oidc_verification(jwt: &str) -> Result<PreparedOidcToken> {
    let segments: Vec<&str> = jwt.trim().split('.').collect();
    let [header, payload, signature] = segments.as_slice() else {
        return Err(PreprocessError::MalformedToken(format!(
            "expected 3 segments, got {}",
            segments.len()
        )));
    };

    let signature = URL_SAFE_NO_PAD.decode(signature)?;
    if signature.len() != RSA_2048_SIGNATURE_LENGTH {
        return Err(PreprocessError::InvalidLength {
            what: "signature",
            expected: RSA_2048_SIGNATURE_LENGTH,
            actual: signature.len(),
        });
    }

    let jwt_header: JwtHeader = decode_json(header)?;
    if jwt_header.alg != RS256 {
        return Err(PreprocessError::UnsupportedAlgorithm(jwt_header.alg));
    }

    let claims: IdTokenClaims = decode_json(payload)?;
    let provider = OidcProvider::from_issuer(&claims.iss)
        .ok_or_else(|| PreprocessError::UnknownIssuer(claims.iss.clone()))?;

    let key_index = key_index_for_kid(provider, &jwt_header.kid)
        .ok_or_else(|| PreprocessError::UnknownKeyId(jwt_header.kid.clone()))?;

    Ok(PreparedOidcToken {
        verification_data: OidcVerificationData {
            signing_input_hash: signing_input_hash(header, payload),
            signature,
            provider,
            key_index,
        },
        context: OidcVerificationContext {
            header: header.to_string(),
            payload: payload.to_string(),
        },
        claims,
    })
}
