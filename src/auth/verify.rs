//! Check the signatures on a transaction's authorization entries the way the network will:
//! rebuild each payload from the entry as it stands, hash it, and verify the stored proof.

use ed25519_dalek::{Signature, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::xdr::{self, Hash, ScVal, TransactionEnvelope};

use super::{credentials, credentials::SignatureProof, payload, AddressAuth, Position};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] super::Error),
    #[error("{position} is not signed")]
    MissingSignature { position: Position },
    #[error("{position} has a malformed signature: {source}")]
    MalformedSignature {
        position: Position,
        source: credentials::Error,
    },
    #[error("{position} has a signature that does not verify against public key {public_key}")]
    InvalidSignature {
        position: Position,
        public_key: stellar_strkey::ed25519::PublicKey,
    },
    #[error(transparent)]
    Xdr(#[from] xdr::Error),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verified {
    pub position: Position,
    pub public_key: stellar_strkey::ed25519::PublicKey,
    pub digest: [u8; 32],
}

/// Verify the signature of every authorization entry with address credentials.
pub fn verify_authorizations(
    txe: &TransactionEnvelope,
    network_id: &Hash,
) -> Result<Vec<Verified>, Error> {
    super::locate(txe)?
        .map(|auth| verify(auth, network_id))
        .collect()
}

pub fn verify(auth: AddressAuth<'_>, network_id: &Hash) -> Result<Verified, Error> {
    let AddressAuth {
        position,
        entry,
        credentials,
    } = auth;
    if credentials.signature == ScVal::Void {
        return Err(Error::MissingSignature { position });
    }
    let proof = SignatureProof::try_from(&credentials.signature)
        .map_err(|source| Error::MalformedSignature { position, source })?;

    let payload = payload::build(
        network_id,
        credentials.nonce,
        credentials.signature_expiration_ledger,
        &entry.root_invocation,
    )?;
    let digest: [u8; 32] = Sha256::digest(payload).into();

    let public_key = stellar_strkey::ed25519::PublicKey(proof.public_key);
    let invalid = || Error::InvalidSignature {
        position,
        public_key: public_key.clone(),
    };
    let verifying_key = VerifyingKey::from_bytes(&proof.public_key).map_err(|_| invalid())?;
    verifying_key
        .verify_strict(&digest, &Signature::from_bytes(&proof.signature))
        .map_err(|_| invalid())?;
    tracing::trace!(%position, digest = %hex::encode(digest), "verified authorization");

    Ok(Verified {
        position,
        public_key,
        digest,
    })
}
