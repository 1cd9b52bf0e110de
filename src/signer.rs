use ed25519_dalek::Signer as _;
use sha2::{Digest, Sha256};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to sign payload: {0}")]
    Signing(#[from] ed25519_dalek::SignatureError),
}

/// The digest of an authorization payload and the signature over that digest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedPayload {
    pub digest: [u8; 32],
    pub signature: [u8; 64],
}

/// Something that can sign Soroban authorization payloads with an ed25519 key.
pub trait Signer {
    /// Currently only supports ed25519 keys
    fn public_key(&self) -> stellar_strkey::ed25519::PublicKey;

    /// Sign an arbitrary byte array
    fn sign_blob(&self, blob: &[u8]) -> Result<[u8; 64], Error>;

    /// Hash the serialized payload with SHA-256 and sign the digest.
    ///
    /// The network verifies the signature against the digest, never against the payload bytes,
    /// so the payload must not be signed directly.
    fn sign_payload(&self, payload: &[u8]) -> Result<SignedPayload, Error> {
        let digest: [u8; 32] = Sha256::digest(payload).into();
        let signature = self.sign_blob(&digest)?;
        Ok(SignedPayload { digest, signature })
    }
}

pub struct LocalKey {
    key: ed25519_dalek::SigningKey,
}

impl LocalKey {
    pub fn new(key: ed25519_dalek::SigningKey) -> Self {
        Self { key }
    }
}

impl Signer for LocalKey {
    fn public_key(&self) -> stellar_strkey::ed25519::PublicKey {
        stellar_strkey::ed25519::PublicKey(self.key.verifying_key().to_bytes())
    }

    fn sign_blob(&self, blob: &[u8]) -> Result<[u8; 64], Error> {
        Ok(self.key.try_sign(blob)?.to_bytes())
    }
}
