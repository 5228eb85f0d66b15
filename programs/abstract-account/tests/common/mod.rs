#![allow(dead_code)]

use rsa::BigUint;
use solana_abstract_account::{
    codec,
    contract::auth::{rsa::constants::RsaKeyComponents, webauthn::webauthn_signed_message},
    preprocess::{
        ethereum::personal_sign_message,
        precompile::{secp256k1_instruction, secp256r1_instruction, InstructionBundle},
        webauthn::{transaction_client_data, webauthn_verification_context},
    },
    types::{
        account::AbstractAccount,
        identity::{
            wallet::WalletType, webauthn::WebAuthnAuthenticator, Identity, IdentityPermissions,
            IdentityWithPermissions,
        },
        transaction::transaction::{Auth, Transaction, UserOp, VerificationContext},
    },
};

pub const ORIGIN: &str = "https://wallet.example";

/// Throwaway 2048-bit RSA modulus, e = 65537, that signed [`JWT`].
pub const MODULUS_HEX: &str = "\
    bbc7a8ab1dabe245004368ac501547b44d69d42331ce0705580adda1bc5f965703c032f61513027ec4a183384a7623d7\
    b837dea580e5ddee337c3e2e3d2ad035e1c60bbf04a482a348fcbdc0e543067d2527489da7a3af21d0623c206709bc01\
    853ecbaec073d1138fb28d62e57a02e8efadaa73750d146a7dd7043f9c240c68f8fce69c1213ae834a802afecabd7143\
    82117af47c09db81f4272524fd3983fb3e7b98da064e79b58b755bbf916f91cdacf2a53c3b5e06c58fda8f89650a00a0\
    60df77d9b0c05613c9ac5eabe5e3dab6bbee871e14f097252201b210027ed43b51150c2c842bd02d7a8c9c19c813196c\
    3c3f7f1e7b8c2560e234451c0ed0b2ff";

/// Google-issued shape, `sub` 110169484474386276334, nonce bound to [`TRANSACTION_HEX`].
pub const JWT: &str = "\
    eyJhbGciOiJSUzI1NiIsImtpZCI6Ijg5Y2UzNTk4YzQ3M2FmMWJkYTRiZmY5NWU2Yzg3MzY0NTAyMDZmYmEiLCJ0eXAiOiJKV1QifQ.\
    eyJpc3MiOiJodHRwczovL2FjY291bnRzLmdvb2dsZS5jb20iLCJhdWQiOiJhYS10ZXN0LWNsaWVudCIsInN1YiI6IjExMDE2\
    OTQ4NDQ3NDM4NjI3NjMzNCIsIm5vbmNlIjoiS2lSM2ZTd3hzQjZ5Z3lCMzBMVGxoNHpIR0FieXRJX0tLSmFPXy12a1ZHUSIs\
    ImlhdCI6MTc2MDAwMDAwMCwiZXhwIjoxNzYwMDAzNjAwfQ.\
    TfA7h0tLu7Qf8vXxe5UWufPUc3xJK3TCkQibOu2AIvw098nH100qjrWs0038ZldhtPp978ZRAl2aJUlnw6OlCUFiAxWS\
    38MwvU-rpyf0iYBunoaACzb9TCHKO0LpEFnJV9jJ_u9hugRnN7q98Y_u0D41UM6mlFQrvSCh2Uv5C5sU_9FbuVQRIGoLAg\
    IQQqCU7ZhQztOFU88xNTt9JINFfPH5uAp-NgbH3hqYSMMZamuMVD4NW9Gm_NXgEGl6RM7S2q4PZbdkOJmLmrKZ-Qu_GkiJw\
    -qsmoiFYp8RFQHIEufLYuvxw3YGL0OSac2jPN8wIzQ1gkOmG2Sql-yL_V-HZw";

/// `{ account_id: 0, nonce: 0, AddIdentity(Ethereum(0x11..), act_as) }`
pub const TRANSACTION_HEX: &str =
    "00000000000000000000000000000000000000000000000001000011111111111111111111111111111111111111110101";

pub const SUBJECT: &str = "110169484474386276334";

pub fn test_key() -> RsaKeyComponents {
    RsaKeyComponents {
        modulus: BigUint::from_bytes_be(&hex::decode(MODULUS_HEX).unwrap()),
        exponent: BigUint::from(65537u32),
    }
}

pub fn ethereum(byte: u8) -> Identity {
    Identity::Wallet(WalletType::Ethereum([byte; 20]))
}

pub fn passkey(byte: u8) -> Identity {
    let mut compressed_public_key = [byte; 33];
    compressed_public_key[0] = 0x02;

    Identity::WebAuthn(WebAuthnAuthenticator {
        key_id: format!("credential-{byte}"),
        compressed_public_key,
    })
}

pub fn delegate(identity: Identity) -> IdentityWithPermissions {
    IdentityWithPermissions {
        identity,
        permissions: Some(IdentityPermissions {
            enable_act_as: true,
        }),
    }
}

pub fn owner_only(identity: Identity) -> IdentityWithPermissions {
    IdentityWithPermissions {
        identity,
        permissions: None,
    }
}

pub fn new_account(account_id: u64, primary: Identity) -> AbstractAccount {
    AbstractAccount::new(account_id, owner_only(primary), 254)
}

pub fn user_op(
    identity: Identity,
    verification_context: Option<VerificationContext>,
    transaction: Transaction,
) -> UserOp {
    UserOp {
        auth: Auth {
            identity,
            verification_context,
        },
        transaction,
    }
}

/// Instructions of a transaction where the Ethereum wallet `address` signed `signed`.
pub fn secp256k1_bundle(address: [u8; 20], signed: &Transaction) -> InstructionBundle {
    let message = personal_sign_message(signed).unwrap();
    let precompile = secp256k1_instruction(&address, &[0x5A; 64], 0, &message, 0).unwrap();

    InstructionBundle::following(vec![precompile])
}

/// A passkey assertion over `client_data`, the precompile instruction verifying it
/// and the matching `UserOp` for `transaction`.
pub fn webauthn_op(
    identity: &Identity,
    client_data: String,
    transaction: Transaction,
) -> (InstructionBundle, UserOp) {
    let Identity::WebAuthn(authenticator) = identity else {
        panic!("not a passkey identity");
    };

    let authenticator_data = vec![0x49; 37];
    let message = webauthn_signed_message(&authenticator_data, &client_data);
    let precompile = secp256r1_instruction(
        &[0x6B; 64],
        &authenticator.compressed_public_key,
        &message,
    )
    .unwrap();

    let op = user_op(
        identity.clone(),
        Some(webauthn_verification_context(authenticator_data, client_data)),
        transaction,
    );

    (InstructionBundle::following(vec![precompile]), op)
}

pub fn signed_by_passkey(
    identity: &Identity,
    transaction: Transaction,
) -> (InstructionBundle, UserOp) {
    let client_data = transaction_client_data(&transaction, ORIGIN).unwrap();
    webauthn_op(identity, client_data, transaction)
}

pub fn transaction_from_hex(transaction_hex: &str) -> Transaction {
    codec::decode(&hex::decode(transaction_hex).unwrap()).unwrap()
}
