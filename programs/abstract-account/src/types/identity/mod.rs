use anchor_lang::prelude::*;

use crate::codec;

pub mod oidc;
pub mod wallet;
pub mod webauthn;

use oidc::OidcAuthenticator;
use wallet::WalletType;
use webauthn::WebAuthnAuthenticator;

#[derive(Debug, AnchorSerialize, AnchorDeserialize, Eq, PartialEq, Clone)]
pub enum Identity {
    Wallet(WalletType),
    WebAuthn(WebAuthnAuthenticator),
    Oidc(OidcAuthenticator),
}

#[derive(Debug, AnchorSerialize, AnchorDeserialize, Eq, PartialEq, Clone)]
pub struct IdentityWithPermissions {
    pub identity: Identity,
    pub permissions: Option<IdentityPermissions>,
}

impl IdentityWithPermissions {
    pub fn byte_size(&self) -> usize {
        codec::encoded_len(self)
    }

    /// `None` grants the same rights as `enable_act_as: false`.
    pub fn can_act_as(&self) -> bool {
        self.permissions
            .as_ref()
            .is_some_and(|permissions| permissions.enable_act_as)
    }
}

#[derive(Debug, AnchorSerialize, AnchorDeserialize, Eq, PartialEq, Clone, Default)]
pub struct IdentityPermissions {
    pub enable_act_as: bool,
}
