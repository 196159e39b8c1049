//! # Recurrence Demo
//!
//! The Recurrence Demo performs the following functions:
//! * Synthesises a signal of the user specified shape, length and noise.
//! * Applies the recurrence selected by the subcommand to the signal.
//! * Writes one row per step to stdout, as CSV or JSON lines, for an external plotter.
//!
//! Logs are written to stderr so they do not interleave with the rows.
mod output;
mod parameters;
mod processing;
mod signal;

use clap::Parser;
use miette::IntoDiagnostic;
use parameters::{Mode, OutputFormat};
use recurrence_common::{TracerOptions, init_tracer};
use signal::SignalParameters;
use std::io::{BufWriter, stdout};
use tracing::{info, warn};

/// [clap] derived struct to handle command line parameters.
#[derive(Debug, Parser)]
#[clap(author, version = recurrence_common::version!(), about)]
struct Cli {
    #[clap(flatten)]
    tracer_options: TracerOptions,

    #[clap(flatten)]
    signal: SignalParameters,

    /// Format of the rows written to stdout
    #[clap(long, default_value = "csv")]
    format: OutputFormat,

    #[command(subcommand)]
    pub(crate) mode: Mode,
}

fn main() -> miette::Result<()> {
    let args = Cli::parse();

    init_tracer(&args.tracer_options).into_diagnostic()?;

    let samples = signal::synthesise(&args.signal).into_diagnostic()?;
    info!("Applying {:?} to {} samples", args.mode, samples.len());

    let outcome =
        processing::process(&args.mode, &samples, args.signal.sample_time).into_diagnostic()?;

    let mut writer = BufWriter::new(stdout().lock());
    outcome
        .table
        .write(args.format, &mut writer)
        .into_diagnostic()?;

    if let Some(error) = outcome.error {
        warn!(
            "Evaluation stopped after {} of {} samples",
            outcome.table.rows.len(),
            samples.len()
        );
        return Err(error).into_diagnostic();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_subcommand_options() -> Result<(), clap::Error> {
        let cli = Cli::try_parse_from([
            "recurrence-demo",
            "--signal",
            "noisy-sine",
            "--length",
            "64",
            "--seed",
            "7",
            "--format",
            "json",
            "histogram",
            "--lo",
            "-2",
            "--hi",
            "2",
        ])?;
        assert_eq!(cli.signal.length, 64);
        assert_eq!(cli.signal.seed, Some(7));
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(
            cli.mode,
            Mode::Histogram(parameters::HistogramParameters { lo, hi, precision: 1, .. })
                if lo == -2.0 && hi == 2.0
        ));
        Ok(())
    }

    #[test]
    fn depth_must_be_positive() {
        assert!(Cli::try_parse_from(["recurrence-demo", "sum", "--depth", "0"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["recurrence-demo", "mean", "--depth", "3"]).map(|cli| cli.mode),
            Ok(Mode::Mean(stack)) if stack.depth.get() == 3
        ));
    }
}
