use crate::xdr::{
    self, ScBytes, ScMap, ScMapEntry, ScSymbol, ScVal, SorobanAddressCredentials,
};

const PUBLIC_KEY: &str = "public_key";
const SIGNATURE: &str = "signature";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("signature is not a map of public_key (32 bytes) and signature (64 bytes)")]
    MalformedSignature,
    #[error(transparent)]
    Xdr(#[from] xdr::Error),
}

/// The ed25519 signature proof stored in an address credential's `signature` field, in the
/// shape account contracts deserialize:
///
/// ```text
/// { public_key: BytesN<32>, signature: BytesN<64> }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureProof {
    pub public_key: [u8; 32],
    pub signature: [u8; 64],
}

impl SignatureProof {
    pub fn to_scval(&self) -> Result<ScVal, xdr::Error> {
        let map = ScMap::sorted_from(vec![
            (
                ScVal::Symbol(ScSymbol(PUBLIC_KEY.try_into()?)),
                ScVal::Bytes(self.public_key.to_vec().try_into()?),
            ),
            (
                ScVal::Symbol(ScSymbol(SIGNATURE.try_into()?)),
                ScVal::Bytes(self.signature.to_vec().try_into()?),
            ),
        ])?;
        Ok(ScVal::Map(Some(map)))
    }
}

impl TryFrom<&ScVal> for SignatureProof {
    type Error = Error;

    fn try_from(value: &ScVal) -> Result<Self, Self::Error> {
        let ScVal::Map(Some(ScMap(entries))) = value else {
            return Err(Error::MalformedSignature);
        };
        let [ScMapEntry {
            key: public_key_key,
            val: ScVal::Bytes(ScBytes(public_key)),
        }, ScMapEntry {
            key: signature_key,
            val: ScVal::Bytes(ScBytes(signature)),
        }] = entries.as_slice()
        else {
            return Err(Error::MalformedSignature);
        };
        if !is_symbol(public_key_key, PUBLIC_KEY) || !is_symbol(signature_key, SIGNATURE) {
            return Err(Error::MalformedSignature);
        }
        Ok(SignatureProof {
            public_key: public_key
                .as_slice()
                .try_into()
                .map_err(|_| Error::MalformedSignature)?,
            signature: signature
                .as_slice()
                .try_into()
                .map_err(|_| Error::MalformedSignature)?,
        })
    }
}

fn is_symbol(val: &ScVal, name: &str) -> bool {
    matches!(val, ScVal::Symbol(ScSymbol(symbol)) if symbol.as_slice() == name.as_bytes())
}

/// Write a signature into address credentials, replacing whatever signature they held, and set
/// the ledger the signature expires at. The nonce and address are left as they are.
pub fn apply(
    credentials: &mut SorobanAddressCredentials,
    signature_expiration_ledger: u32,
    proof: &SignatureProof,
) -> Result<(), xdr::Error> {
    let signature = proof.to_scval()?;
    credentials.signature_expiration_ledger = signature_expiration_ledger;
    credentials.signature = signature;
    Ok(())
}
