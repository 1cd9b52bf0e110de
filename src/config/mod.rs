use clap::arg;

use crate::signer::LocalKey;

pub mod network;
pub mod secret;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Secret(#[from] secret::Error),
    #[error(transparent)]
    Network(#[from] network::Error),
}

#[derive(Debug, clap::Args, Clone)]
#[group(skip)]
pub struct Args {
    /// Secret key that signs every authorization entry with address credentials. Either the
    /// 32-byte ed25519 seed hex-encoded, or a Stellar secret key (S...)
    #[arg(long, env = "STELLAR_SECRET_KEY", hide_env_values = true)]
    pub secret_key: secret::Secret,

    #[command(flatten)]
    pub network: network::Args,

    /// The ledger sequence after which the signatures become invalid. Must not be too far in the
    /// future
    #[arg(long, env = "STELLAR_SIGNATURE_EXPIRATION_LEDGER")]
    pub signature_expiration_ledger: u32,
}

impl Args {
    pub fn signer(&self) -> LocalKey {
        LocalKey::new(self.secret_key.signing_key())
    }

    pub fn get_network(&self) -> Result<network::Network, Error> {
        Ok(self.network.get()?)
    }
}
