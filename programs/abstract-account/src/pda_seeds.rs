pub const ACCOUNT_MANAGER_SEED: &[u8] = b"account_manager";
pub const ABSTRACT_ACCOUNT_SEED: &[u8] = b"account";
pub const RSA_MODPOW_SEED: &[u8] = b"rsa_modpow";
