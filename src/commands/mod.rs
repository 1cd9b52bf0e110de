use std::str::FromStr;

use clap::{CommandFactory, FromArgMatches, Parser};

pub mod global;
pub mod sign;
pub mod version;

pub const ABOUT: &str = "Sign Soroban authorization entries in a transaction envelope with an ed25519 key";

pub const LONG_ABOUT: &str = "

Reads a base64 encoded transaction envelope, signs every authorization entry that has address \
credentials, and writes the modified envelope to stdout, ready to be re-simulated and sent:

    stellar contract invoke --source feepayer --id $CONTRACT --build-only -- increment \\
      | stellar tx simulate \\
      | stellar sign-auth-ed25519 --secret-key S... --signature-expiration-ledger 12345 \\
      | stellar tx simulate \\
      | stellar tx sign --sign-with-key feepayer \\
      | stellar tx send

Entries authorized by the transaction's source account are left as they are.";

#[derive(Parser, Debug)]
#[command(
    name = "stellar-sign-auth-ed25519",
    about = ABOUT,
    long_about = ABOUT.to_string() + LONG_ABOUT,
    version = version::short(),
    long_version = version::long(),
    disable_help_subcommand = true,
)]
pub struct Root {
    #[command(flatten)]
    pub global_args: global::Args,

    #[command(flatten)]
    pub cmd: sign::Cmd,
}

impl Root {
    pub fn new() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    pub fn from_arg_matches<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::from_arg_matches_mut(&mut Self::command().try_get_matches_from(itr)?)
    }

    pub fn run(&self) -> Result<(), Error> {
        self.cmd.run(&self.global_args)?;
        Ok(())
    }
}

impl FromStr for Root {
    type Err = clap::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_arg_matches(s.split_whitespace())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Sign(#[from] sign::Error),
}
