use std::{fmt, str::FromStr};

use stellar_strkey::ed25519::PrivateKey;
use zeroize::Zeroize;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot parse secret key: expected a 32-byte ed25519 seed hex-encoded or a Stellar secret key (S...)")]
    InvalidSecretKey,
}

/// An ed25519 seed, accepted either hex-encoded or as a strkey. Zeroed when dropped.
#[derive(Clone)]
pub struct Secret([u8; 32]);

impl Secret {
    pub fn signing_key(&self) -> ed25519_dalek::SigningKey {
        ed25519_dalek::SigningKey::from_bytes(&self.0)
    }
}

impl FromStr for Secret {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(PrivateKey(seed)) = PrivateKey::from_string(s) {
            return Ok(Secret(seed));
        }
        let mut bytes = hex::decode(s).map_err(|_| Error::InvalidSecretKey)?;
        let seed = <[u8; 32]>::try_from(bytes.as_slice()).map_err(|_| Error::InvalidSecretKey);
        bytes.zeroize();
        Ok(Secret(seed?))
    }
}

impl Zeroize for Secret {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// Never print the seed, not even in debug logs.
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}
