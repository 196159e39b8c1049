//! Defines the parameters of the recurrences the demo can apply.
use clap::{Parser, Subcommand, ValueEnum};
use recurrence::Real;
use std::num::NonZeroUsize;

/// Encapsulates the depth of a stack of identical scalar recurrences.
#[derive(Debug, Clone, Parser)]
pub(crate) struct StackParameters {
    /// Number of times the recurrence is applied, each layer consuming the hidden states of the last.
    #[clap(long, default_value = "1")]
    pub(crate) depth: NonZeroUsize,
}

/// Encapsulates the parameters specific to the exponential average.
#[derive(Debug, Clone, Parser)]
pub(crate) struct ExponentialAverageParameters {
    /// Persistence of the previous hidden state, in [0, 1].
    #[clap(long, default_value = "0.9")]
    pub(crate) alpha: Real,

    #[clap(flatten)]
    pub(crate) stack: StackParameters,
}

/// Encapsulates the parameters specific to the Riemann sum.
#[derive(Debug, Clone, Parser)]
pub(crate) struct RiemannSumParameters {
    /// Number of samples per unit interval. Defaults to the reciprocal of the sample time.
    #[clap(long)]
    pub(crate) samples_per_unit: Option<Real>,

    #[clap(flatten)]
    pub(crate) stack: StackParameters,
}

/// Encapsulates the parameters specific to the running histogram.
#[derive(Debug, Clone, Parser)]
pub(crate) struct HistogramParameters {
    /// Weight given to each new sample, in [0, 1].
    #[clap(long, default_value = "0.05")]
    pub(crate) alpha: Real,

    /// Lowest bin label. Lower samples are counted in this bin.
    #[clap(long, default_value = "0", allow_negative_numbers = true)]
    pub(crate) lo: Real,

    /// Highest bin label. Higher samples are counted in this bin.
    #[clap(long, default_value = "10", allow_negative_numbers = true)]
    pub(crate) hi: Real,

    /// Number of decimal places each sample is rounded to.
    #[clap(long, default_value = "1")]
    pub(crate) precision: u32,
}

/// Specifies which recurrence is applied, and wraps the recurrence-specific options in each variant.
#[derive(Subcommand, Debug)]
pub(crate) enum Mode {
    /// Running sum of the samples.
    Sum(StackParameters),
    /// Running arithmetic mean of the samples.
    Mean(StackParameters),
    /// Exponential average of the samples.
    ExponentialAverage(ExponentialAverageParameters),
    /// Riemann sum, approximating the integral of the signal.
    RiemannSum(RiemannSumParameters),
    /// Running maximum of the samples.
    Max(StackParameters),
    /// Running minimum of the samples.
    Min(StackParameters),
    /// Number of times the signal has crossed or touched zero.
    ZeroCrossings,
    /// Exponentially forgetting histogram of the samples.
    Histogram(HistogramParameters),
    /// Running mean and population variance of the samples.
    Variance,
}

/// Determines how rows are written to stdout.
#[derive(Default, Clone, Copy, Debug, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Comma separated values, preceded by a header line.
    #[default]
    Csv,
    /// One JSON object per line.
    Json,
}
