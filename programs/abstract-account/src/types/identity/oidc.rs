use anchor_lang::prelude::*;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, AnchorSerialize, AnchorDeserialize)]
pub enum OidcProvider {
    #[default]
    Google,
}

impl OidcProvider {
    pub fn issuers(&self) -> &'static [&'static str] {
        match self {
            OidcProvider::Google => &["https://accounts.google.com", "accounts.google.com"],
        }
    }

    pub fn accepts_issuer(&self, issuer: &str) -> bool {
        self.issuers().iter().any(|candidate| *candidate == issuer)
    }

    pub fn from_issuer(issuer: &str) -> Option<Self> {
        [OidcProvider::Google]
            .into_iter()
            .find(|provider| provider.accepts_issuer(issuer))
    }
}

/// Identity backed by an OIDC provider's RSA-signed ID tokens.
///
/// `subject` is the provider's stable `sub` claim for the user.
#[derive(Debug, AnchorSerialize, AnchorDeserialize, PartialEq, Eq, Clone)]
pub struct OidcAuthenticator {
    pub provider: OidcProvider,
    pub subject: String,
}
