use clap::arg;
use sha2::{Digest, Sha256};

use crate::xdr::Hash;

pub mod passphrase {
    pub const TESTNET: &str = "Test SDF Network ; September 2015";
    pub const FUTURENET: &str = "Test SDF Future Network ; October 2022";
    pub const MAINNET: &str = "Public Global Stellar Network ; September 2015";
    pub const LOCAL: &str = "Standalone Network ; February 2017";
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unknown network '{name}'; expected one of testnet, futurenet, mainnet, local, or pass --network-passphrase")]
    UnknownNetwork { name: String },
}

#[derive(Debug, clap::Args, Clone, Default)]
#[group(skip)]
pub struct Args {
    /// Network passphrase of the network the invocation is intended to be sent to. Defaults to
    /// testnet's when neither this nor --network is given
    #[arg(long, env = "STELLAR_NETWORK_PASSPHRASE")]
    pub network_passphrase: Option<String>,

    /// Well-known network to use the passphrase of: testnet, futurenet, mainnet or local.
    /// --network-passphrase takes precedence
    #[arg(long, env = "STELLAR_NETWORK")]
    pub network: Option<String>,
}

impl Args {
    pub fn get(&self) -> Result<Network, Error> {
        if let Some(network_passphrase) = &self.network_passphrase {
            return Ok(Network::new(network_passphrase));
        }
        match &self.network {
            Some(name) => Network::from_name(name),
            None => Ok(Network::new(passphrase::TESTNET)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// Network passphrase the network id is derived from
    pub network_passphrase: String,
}

impl Network {
    pub fn new(network_passphrase: impl Into<String>) -> Self {
        Network {
            network_passphrase: network_passphrase.into(),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, Error> {
        let network_passphrase = match name.to_lowercase().as_str() {
            "testnet" => passphrase::TESTNET,
            "futurenet" => passphrase::FUTURENET,
            "mainnet" | "pubnet" | "public" => passphrase::MAINNET,
            "local" | "standalone" => passphrase::LOCAL,
            _ => {
                return Err(Error::UnknownNetwork {
                    name: name.to_string(),
                })
            }
        };
        Ok(Network::new(network_passphrase))
    }

    /// The network id, the SHA-256 digest of the passphrase.
    pub fn id(&self) -> Hash {
        network_id(&self.network_passphrase)
    }
}

pub fn network_id(network_passphrase: &str) -> Hash {
    Hash(Sha256::digest(network_passphrase.as_bytes()).into())
}
