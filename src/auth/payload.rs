//! The payload an address signs to authorize a Soroban invocation.
//!
//! The network rebuilds this same `HashIdPreimage` from the authorization entry when it checks
//! the signature, so the bytes produced here must match its encoding exactly: the preimage's
//! fields are network id, nonce, signature expiration ledger, then the root invocation.

use crate::xdr::{
    self, Hash, HashIdPreimage, HashIdPreimageSorobanAuthorization, Limits,
    SorobanAuthorizedInvocation, WriteXdr,
};

pub use crate::config::network::network_id;

pub fn preimage(
    network_id: &Hash,
    nonce: i64,
    signature_expiration_ledger: u32,
    invocation: &SorobanAuthorizedInvocation,
) -> HashIdPreimage {
    HashIdPreimage::SorobanAuthorization(HashIdPreimageSorobanAuthorization {
        network_id: network_id.clone(),
        nonce,
        signature_expiration_ledger,
        invocation: invocation.clone(),
    })
}

/// Serialize the authorization preimage to the XDR bytes that get hashed and signed.
pub fn build(
    network_id: &Hash,
    nonce: i64,
    signature_expiration_ledger: u32,
    invocation: &SorobanAuthorizedInvocation,
) -> Result<Vec<u8>, xdr::Error> {
    preimage(network_id, nonce, signature_expiration_ledger, invocation).to_xdr(Limits::none())
}
