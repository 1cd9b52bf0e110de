use dotenvy::dotenv;
use tracing_subscriber::{
    filter::ParseError,
    fmt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

use crate::{commands::global, print::Print, Root};

#[derive(thiserror::Error, Debug)]
enum Error {
    #[error("{source}: {filter}")]
    FilterLogs { filter: String, source: ParseError },
    #[error("failed to set the global tracing subscriber: {0}")]
    Logger(#[from] TryInitError),
}

// The names the options were read from before they were namespaced under STELLAR_, by
// soroban-cli (SOROBAN_*) and by the first versions of this plugin (unprefixed).
const LEGACY_VARS: &[(&str, &[&str])] = &[
    ("STELLAR_SECRET_KEY", &["SOROBAN_SECRET_KEY", "SECRET_KEY"]),
    (
        "STELLAR_NETWORK_PASSPHRASE",
        &["SOROBAN_NETWORK_PASSPHRASE", "NETWORK_PASSPHRASE"],
    ),
    ("STELLAR_NETWORK", &["SOROBAN_NETWORK"]),
    (
        "STELLAR_SIGNATURE_EXPIRATION_LEDGER",
        &["SOROBAN_SIGNATURE_EXPIRATION_LEDGER", "SIGNATURE_EXPIRATION_LEDGER"],
    ),
];

pub fn main() {
    let _ = dotenv().unwrap_or_default();
    map_legacy_env_vars();

    let root = Root::new().unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logging(&root.global_args) {
        Print::new(false).errorln(format!("error: {e}"));
        std::process::exit(1);
    }

    if let Err(e) = root.run() {
        Print::new(false).errorln(format!("error: {e}"));
        std::process::exit(1);
    }
}

fn map_legacy_env_vars() {
    for (name, legacy_names) in LEGACY_VARS {
        if std::env::var_os(name).is_some() {
            continue;
        }
        if let Some(val) = legacy_names.iter().find_map(std::env::var_os) {
            std::env::set_var(name, val);
        }
    }
}

fn init_logging(global_args: &global::Args) -> Result<(), Error> {
    let Some(level) = global_args.log_level() else {
        return Ok(());
    };

    let mut e_filter = EnvFilter::from_default_env().add_directive(
        format!("stellar_sign_auth={level}")
            .parse()
            .map_err(|source| Error::FilterLogs {
                filter: format!("stellar_sign_auth={level}"),
                source,
            })?,
    );
    for filter in &global_args.filter_logs {
        e_filter = e_filter.add_directive(filter.parse().map_err(|source| Error::FilterLogs {
            filter: filter.clone(),
            source,
        })?);
    }

    fmt::Subscriber::builder()
        .with_env_filter(e_filter)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .finish()
        .try_init()?;
    Ok(())
}
