#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_panics_doc
)]
//! Sign the Soroban authorization entries of a transaction envelope with an ed25519 key.
//!
//! The crate is built as the `stellar-sign-auth-ed25519` binary, which `stellar` discovers on
//! `$PATH` as the plugin subcommand `stellar sign-auth-ed25519`. It reads a base64 encoded
//! `TransactionEnvelope`, signs every authorization entry that carries address credentials,
//! and writes the modified envelope back out, ready to be re-simulated and submitted:
//!
//! ```bash
//! stellar contract invoke --source feepayer --id $CONTRACT --build-only -- increment \
//!   | stellar tx simulate \
//!   | stellar sign-auth-ed25519 --secret-key S... --signature-expiration-ledger 12345 \
//!   | stellar tx simulate \
//!   | stellar tx sign --sign-with-key feepayer \
//!   | stellar tx send
//! ```
//!
//! The pieces are usable as a library too: [`auth::locate`] finds the entries,
//! [`auth::payload`] builds what the network hashes, [`signer::Signer`] signs the hash,
//! [`auth::credentials`] writes the proof back, and [`auth::sign::sign_authorizations`] runs
//! the whole thing over an envelope.

pub use stellar_xdr::curr as xdr;

mod cli;
pub use cli::main;

pub mod auth;
pub mod commands;
pub mod config;
pub mod envelope;
pub mod print;
pub mod signer;

pub use commands::Root;
