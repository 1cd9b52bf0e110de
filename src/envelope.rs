use std::ffi::OsString;
use std::fs::File;
use std::io::{stdin, Cursor, Read};
use std::path::Path;

use crate::xdr::{self, Limited, Limits, ReadXdr, TransactionEnvelope, WriteXdr};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to decode transaction envelope: {0}")]
    Decode(#[source] xdr::Error),
    #[error("failed to encode transaction envelope: {0}")]
    Encode(#[source] xdr::Error),
    #[error("failed to read transaction envelope: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a base64 `TransactionEnvelope` from a file, from the argument itself, or from stdin when
/// no argument is given.
///
/// The input is always read to the end before decoding starts.
pub fn from_input(input: Option<&OsString>) -> Result<TransactionEnvelope, Error> {
    let mut buf = Vec::new();
    if let Some(input) = input {
        if let Ok(true) = Path::new(input).try_exists() {
            File::open(input)?.read_to_end(&mut buf)?;
        } else {
            buf = input.clone().into_encoded_bytes();
        }
    } else {
        stdin().read_to_end(&mut buf)?;
    }
    decode(&buf)
}

/// Decode a base64 `TransactionEnvelope`, ignoring any ASCII whitespace in it.
pub fn decode(base64: &[u8]) -> Result<TransactionEnvelope, Error> {
    let mut lim = Limited::new(SkipWhitespace::new(Cursor::new(base64)), Limits::none());
    TransactionEnvelope::read_xdr_base64_to_end(&mut lim).map_err(Error::Decode)
}

pub fn to_output(txe: &TransactionEnvelope) -> Result<String, Error> {
    txe.to_xdr_base64(Limits::none()).map_err(Error::Encode)
}

/// A wrapper around a `Read` that strips ASCII whitespace, allowing base64 XDR
/// to be read from stdin even when piped with newlines.
pub struct SkipWhitespace<R: Read> {
    pub inner: R,
}

impl<R: Read> SkipWhitespace<R> {
    pub fn new(inner: R) -> Self {
        SkipWhitespace { inner }
    }
}

impl<R: Read> Read for SkipWhitespace<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }

            let mut written = 0;
            for read in 0..n {
                if !buf[read].is_ascii_whitespace() {
                    buf[written] = buf[read];
                    written += 1;
                }
            }

            // A chunk made only of whitespace must not look like end of stream.
            if written > 0 {
                return Ok(written);
            }
        }
    }
}
