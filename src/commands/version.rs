const GIT_REVISION: &str = env!("GIT_REVISION");

pub fn short() -> String {
    format!("{} ({GIT_REVISION})", env!("CARGO_PKG_VERSION"))
}

pub fn long() -> String {
    let xdr = stellar_xdr::VERSION;
    [short(), format!("stellar-xdr {} ({})", xdr.pkg, xdr.rev)].join("\n")
}
