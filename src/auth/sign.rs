use crate::{
    config::network::Network,
    print::Print,
    signer::{self, SignedPayload, Signer},
    xdr::{self, TransactionEnvelope},
};

use super::{credentials::SignatureProof, Position};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Auth(#[from] super::Error),
    #[error(transparent)]
    Signer(#[from] signer::Error),
    #[error("failed to encode authorization: {0}")]
    Encode(#[from] xdr::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// An authorization entry that was signed, and the payload digest its signature covers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signed {
    pub position: Position,
    pub digest: [u8; 32],
}

/// Sign every authorization entry with address credentials in the transaction, and set the
/// ledger the signatures expire at.
///
/// Every such entry is signed, whether or not its address belongs to `signer`, and any
/// signature already present is replaced.
///
/// # Errors
/// Fails without modifying `txe` if the envelope is not a v1 transaction, or if any entry fails
/// to be signed.
pub fn sign_authorizations(
    txe: &mut TransactionEnvelope,
    network: &Network,
    signer: &impl Signer,
    signature_expiration_ledger: u32,
    print: &Print,
) -> Result<Vec<Signed>, Error> {
    let network_id = network.id();
    let public_key = signer.public_key();
    let mut signed = Vec::new();

    super::edit(txe, |position, invocation, creds| {
        print.signln(format!("Authorizing {position}:"));
        if !print.quiet {
            print.println(serde_json::to_string_pretty(invocation)?);
            print.println(serde_json::to_string_pretty(creds)?);
        }

        let payload = super::payload::build(
            &network_id,
            creds.nonce,
            signature_expiration_ledger,
            invocation,
        )?;
        let SignedPayload { digest, signature } = signer.sign_payload(&payload)?;
        print.infoln(format!("Payload Hash: {}", hex::encode(digest)));
        tracing::debug!(
            %position,
            nonce = creds.nonce,
            signature_expiration_ledger,
            digest = %hex::encode(digest),
            "signed authorization payload"
        );

        super::credentials::apply(
            creds,
            signature_expiration_ledger,
            &SignatureProof {
                public_key: public_key.0,
                signature,
            },
        )?;
        print.checkln("Authorized:");
        if !print.quiet {
            print.println(serde_json::to_string_pretty(creds)?);
        }

        signed.push(Signed { position, digest });
        Ok::<_, Error>(())
    })?;

    tracing::trace!(count = signed.len(), "signed authorizations");
    Ok(signed)
}
