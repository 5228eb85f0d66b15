//! RS256 token signed with a throwaway 2048-bit key, e = 65537.
//!
//! The payload binds `sub` 110169484474386276334 to the transaction
//! `{ account_id: 0, nonce: 0, AddIdentity(Ethereum(0x11..), act_as) }`.

use anchor_lang::prelude::*;
use rsa::BigUint;

use super::{
    constants::RsaKeyComponents, rsa_multi_tx::ModpowState, utils::OidcVerificationData,
};
use crate::{config::MODPOW_BITS_PER_STEP, types::identity::oidc::OidcProvider};

pub const MODULUS_HEX: &str = "\
    bbc7a8ab1dabe245004368ac501547b44d69d42331ce0705580adda1bc5f965703c032f61513027ec4a183384a7623d7\
    b837dea580e5ddee337c3e2e3d2ad035e1c60bbf04a482a348fcbdc0e543067d2527489da7a3af21d0623c206709bc01\
    853ecbaec073d1138fb28d62e57a02e8efadaa73750d146a7dd7043f9c240c68f8fce69c1213ae834a802afecabd7143\
    82117af47c09db81f4272524fd3983fb3e7b98da064e79b58b755bbf916f91cdacf2a53c3b5e06c58fda8f89650a00a0\
    60df77d9b0c05613c9ac5eabe5e3dab6bbee871e14f097252201b210027ed43b51150c2c842bd02d7a8c9c19c813196c\
    3c3f7f1e7b8c2560e234451c0ed0b2ff";

pub const SIGNATURE_HEX: &str = "\
    4df03b874b4bbbb41ff2f5f17b9516b9f3d4737c492b74c291089b3aed8022fc34f7c9c7d74d2a8eb5acd34dfc665761\
    b4fa7defc651025d9a254967c3a3a5094162031592dfc330bd4faba727f489806e9e86800b36fd4c21ca3b42e91059c9\
    57d8c9feef61ba046737babdf18feed03e3550cea694542bbd20a1d94bf90b9b14ffd15bb95411206a0b02021042a094\
    ed9850ced38553cf31353b7d2483457cf1f9b80a7e3606c7de1a9848c3196a6b8c543e0d5bd1a6fcd5e010697a44ced2\
    daae0f65b76438998b9ab299f90bbf1a4889c3eaac9a8885629f111501c812e7cb62ebf1c376062f439269cda33cdf30\
    2334358243a61b64aa97ec8bfd5f8767";

pub const SIGNING_INPUT_HASH_HEX: &str =
    "3b0db9d87ed0ff6e83264b9aa34d965ff72255bef5946891debf04e3bbe6d030";

pub const HEADER: &str = "eyJhbGciOiJSUzI1NiIsImtpZCI6Ijg5Y2UzNTk4YzQ3M2FmMWJkYTRiZmY5NWU2Yzg3MzY0NTAyMDZmYmEiLCJ0eXAiOiJKV1QifQ";

pub const PAYLOAD: &str = "\
    eyJpc3MiOiJodHRwczovL2FjY291bnRzLmdvb2dsZS5jb20iLCJhdWQiOiJhYS10ZXN0LWNsaWVudCIsInN1YiI6IjExMDE2\
    OTQ4NDQ3NDM4NjI3NjMzNCIsIm5vbmNlIjoiS2lSM2ZTd3hzQjZ5Z3lCMzBMVGxoNHpIR0FieXRJX0tLSmFPXy12a1ZHUSIs\
    ImlhdCI6MTc2MDAwMDAwMCwiZXhwIjoxNzYwMDAzNjAwfQ";

pub const TRANSACTION_HEX: &str =
    "00000000000000000000000000000000000000000000000001000011111111111111111111111111111111111111110101";

pub const CHALLENGE: &str = "KiR3fSwxsB6ygyB30LTlh4zHGAbytI_KKJaO_-vkVGQ";

pub const SUBJECT: &str = "110169484474386276334";

pub fn test_key() -> RsaKeyComponents {
    RsaKeyComponents {
        modulus: BigUint::from_bytes_be(&hex::decode(MODULUS_HEX).unwrap()),
        exponent: BigUint::from(65537u32),
    }
}

pub fn verification_data() -> OidcVerificationData {
    OidcVerificationData {
        signing_input_hash: hex::decode(SIGNING_INPUT_HASH_HEX)
            .unwrap()
            .try_into()
            .unwrap(),
        signature: hex::decode(SIGNATURE_HEX).unwrap(),
        provider: OidcProvider::Google,
        key_index: 0,
    }
}

/// Runs the engine to completion for `data` under the test key.
pub fn completed_state(owner: Pubkey, data: &OidcVerificationData) -> ModpowState {
    let mut state = ModpowState::default();
    state
        .begin(owner, [7; 32], data, &test_key(), 255)
        .unwrap();
    while !state.advance(&owner, MODPOW_BITS_PER_STEP).unwrap() {}
    state
}
