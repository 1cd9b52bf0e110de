//! Discovery of the Soroban authorization entries in a transaction envelope that need a
//! signature from an address.
//!
//! Only entries with [`SorobanCredentials::Address`] are visited. Entries authorized by the
//! transaction's source account are covered by the transaction signature and are skipped, as
//! are operations other than `InvokeHostFunction`.

use std::fmt;

use crate::xdr::{
    self, InvokeHostFunctionOp, Operation, OperationBody, SorobanAddressCredentials,
    SorobanAuthorizationEntry, SorobanAuthorizedInvocation, SorobanCredentials, Transaction,
    TransactionEnvelope, TransactionV1Envelope,
};

pub mod credentials;
pub mod payload;
pub mod sign;
pub mod verify;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unsupported transaction envelope type: {kind}; only v1 transaction envelopes can have their authorizations signed")]
    UnsupportedEnvelopeKind { kind: &'static str },
    #[error(transparent)]
    Xdr(#[from] xdr::Error),
}

/// Where an authorization entry sits in a transaction: the index of the operation in the
/// transaction, and of the entry in that operation's auth list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub operation: usize,
    pub entry: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation {} auth entry {}", self.operation, self.entry)
    }
}

/// An authorization entry with address credentials.
#[derive(Clone, Copy, Debug)]
pub struct AddressAuth<'a> {
    pub position: Position,
    pub entry: &'a SorobanAuthorizationEntry,
    pub credentials: &'a SorobanAddressCredentials,
}

/// Lazily walks the address-credentialed authorization entries of a transaction in operation
/// order, then entry order. Clone it to walk the entries again.
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    operations: &'a [Operation],
    operation: usize,
    entry: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = AddressAuth<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let operations = self.operations;
        while let Some(op) = operations.get(self.operation) {
            let auths: &'a [SorobanAuthorizationEntry] = match &op.body {
                OperationBody::InvokeHostFunction(InvokeHostFunctionOp { auth, .. }) => {
                    auth.as_slice()
                }
                _ => &[],
            };
            while let Some(entry) = auths.get(self.entry) {
                let position = Position {
                    operation: self.operation,
                    entry: self.entry,
                };
                self.entry += 1;
                match &entry.credentials {
                    SorobanCredentials::Address(credentials) => {
                        return Some(AddressAuth {
                            position,
                            entry,
                            credentials,
                        })
                    }
                    SorobanCredentials::SourceAccount => {}
                }
            }
            self.operation += 1;
            self.entry = 0;
        }
        None
    }
}

/// Find the authorization entries of `txe` that carry address credentials.
///
/// # Errors
/// Returns [`Error::UnsupportedEnvelopeKind`] unless `txe` is a v1 transaction envelope.
pub fn locate(txe: &TransactionEnvelope) -> Result<Entries<'_>, Error> {
    Ok(Entries {
        operations: transaction(txe)?.operations.as_slice(),
        operation: 0,
        entry: 0,
    })
}

/// Visit the same entries as [`locate`], in the same order, with mutable access to their
/// credentials. Returns the number of entries visited.
///
/// Edits are made on copies of the operations and written back to `txe` only once every call
/// to `f` has succeeded, so on error `txe` is left exactly as it was.
pub fn edit<E, F>(txe: &mut TransactionEnvelope, mut f: F) -> Result<usize, E>
where
    E: From<Error> + From<xdr::Error>,
    F: FnMut(Position, &SorobanAuthorizedInvocation, &mut SorobanAddressCredentials) -> Result<(), E>,
{
    let tx = transaction_mut(txe)?;
    let mut operations = tx.operations.to_vec();
    let mut visited = 0;
    for (operation, op) in operations.iter_mut().enumerate() {
        let body = match &mut op.body {
            OperationBody::InvokeHostFunction(body) => body,
            _ => continue,
        };
        let mut auths = body.auth.to_vec();
        for (entry, auth) in auths.iter_mut().enumerate() {
            let SorobanAuthorizationEntry {
                credentials,
                root_invocation,
            } = auth;
            match credentials {
                SorobanCredentials::Address(credentials) => {
                    f(Position { operation, entry }, root_invocation, credentials)?;
                    visited += 1;
                }
                SorobanCredentials::SourceAccount => {}
            }
        }
        body.auth = auths.try_into()?;
    }
    tx.operations = operations.try_into()?;
    Ok(visited)
}

fn transaction(txe: &TransactionEnvelope) -> Result<&Transaction, Error> {
    match txe {
        TransactionEnvelope::Tx(TransactionV1Envelope { tx, .. }) => Ok(tx),
        TransactionEnvelope::TxV0(_) => Err(Error::UnsupportedEnvelopeKind { kind: "TxV0" }),
        TransactionEnvelope::TxFeeBump(_) => {
            Err(Error::UnsupportedEnvelopeKind { kind: "TxFeeBump" })
        }
    }
}

fn transaction_mut(txe: &mut TransactionEnvelope) -> Result<&mut Transaction, Error> {
    match txe {
        TransactionEnvelope::Tx(TransactionV1Envelope { tx, .. }) => Ok(tx),
        TransactionEnvelope::TxV0(_) => Err(Error::UnsupportedEnvelopeKind { kind: "TxV0" }),
        TransactionEnvelope::TxFeeBump(_) => {
            Err(Error::UnsupportedEnvelopeKind { kind: "TxFeeBump" })
        }
    }
}
