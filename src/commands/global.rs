use clap::arg;

pub const HEADING_GLOBAL: &str = "Global Options";

#[derive(Debug, clap::Args, Clone, Default)]
#[group(skip)]
pub struct Args {
    /// Filter logs output. To turn on `stellar_sign_auth::auth=debug` or off `=off`. Can also use env var `RUST_LOG`.
    #[arg(long, short = 'f', global = true, help_heading = HEADING_GLOBAL)]
    pub filter_logs: Vec<String>,

    /// Do not write logs or progress to stderr, only errors
    #[arg(long, short = 'q', global = true, help_heading = HEADING_GLOBAL)]
    pub quiet: bool,

    /// Log DEBUG events
    #[arg(long, short = 'v', global = true, help_heading = HEADING_GLOBAL)]
    pub verbose: bool,

    /// Log DEBUG and TRACE events
    #[arg(long, visible_alias = "vv", global = true, help_heading = HEADING_GLOBAL)]
    pub very_verbose: bool,
}

impl Args {
    pub fn log_level(&self) -> Option<tracing::Level> {
        if self.quiet {
            None
        } else if self.very_verbose {
            Some(tracing::Level::TRACE)
        } else if self.verbose {
            Some(tracing::Level::DEBUG)
        } else {
            Some(tracing::Level::INFO)
        }
    }
}
