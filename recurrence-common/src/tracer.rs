//! Installs the global tracing subscriber.
use clap::Args;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{
    EnvFilter, filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError,
};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),
    #[error("Cannot install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// [clap] derived options controlling log output, to be flattened into a binary's `Cli`.
#[derive(Debug, Clone, Args)]
pub struct TracerOptions {
    /// Log filter directives, e.g. "info" or "recurrence=trace"
    #[clap(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    /// If set, log lines are written without ANSI colour codes
    #[clap(long)]
    pub no_ansi: bool,
}

impl TracerOptions {
    pub fn new(log_filter: &str) -> Self {
        Self {
            log_filter: log_filter.to_owned(),
            no_ansi: false,
        }
    }
}

/// Installs a formatting subscriber which writes to stderr, keeping stdout free for data.
///
/// # Parameters
/// - options: the filter directives and formatting flags.
pub fn init_tracer(options: &TracerOptions) -> Result<(), TracerError> {
    let filter = EnvFilter::try_new(&options.log_filter)?;
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(!options.no_ansi),
        )
        .with(filter)
        .try_init()?;
    debug!("Tracing initialised with filter \"{}\"", options.log_filter);
    Ok(())
}
