use std::ffi::OsString;

use crate::{
    auth::{self, sign::sign_authorizations, verify::verify_authorizations},
    config, envelope,
    print::Print,
    signer::Signer,
    xdr::TransactionEnvelope,
};

use super::global;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] config::Error),
    #[error(transparent)]
    Envelope(#[from] envelope::Error),
    #[error(transparent)]
    Sign(#[from] auth::sign::Error),
    #[error(transparent)]
    Verify(#[from] auth::verify::Error),
}

#[derive(Debug, clap::Parser, Clone)]
#[group(skip)]
pub struct Cmd {
    /// Base-64 transaction envelope XDR, or file containing XDR to decode, or stdin if empty
    #[arg()]
    pub tx_xdr: Option<OsString>,

    #[command(flatten)]
    pub config: config::Args,

    /// Check every signature in the signed envelope before writing it out
    #[arg(long)]
    pub verify: bool,
}

impl Cmd {
    pub fn run(&self, global_args: &global::Args) -> Result<(), Error> {
        let txe = self.sign(&Print::new(global_args.quiet))?;
        println!("{}", envelope::to_output(&txe)?);
        Ok(())
    }

    pub fn sign(&self, print: &Print) -> Result<TransactionEnvelope, Error> {
        let network = self.config.get_network()?;
        let signer = self.config.signer();
        let public_key = signer.public_key();
        print.keyln(format!(
            "Public Key: {} ({public_key})",
            hex::encode(public_key.0)
        ));
        print.globeln(format!(
            "Network Passphrase: {}",
            network.network_passphrase
        ));

        let mut txe = envelope::from_input(self.tx_xdr.as_ref())?;
        let signed = sign_authorizations(
            &mut txe,
            &network,
            &signer,
            self.config.signature_expiration_ledger,
            print,
        )?;
        if signed.is_empty() {
            print.warnln("No authorization entries with address credentials to sign");
        }

        if self.verify {
            let verified = verify_authorizations(&txe, &network.id())?;
            print.checkln(format!("Verified {} signature(s)", verified.len()));
        }
        Ok(txe)
    }
}
