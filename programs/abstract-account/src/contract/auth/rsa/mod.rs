//! RSA signature verification for OIDC ID tokens.
//!
//! A 2048-bit modular exponentiation does not fit in a single transaction's compute budget, so it
//! runs as a checkpointed computation (`rsa_multi_tx`) driven by the signer over several
//! transactions: init, continue until complete, then finalize or consume it in `execute_oidc`.

pub mod constants;
pub mod rsa_multi_tx;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_vectors;
