//! Synthesises the input signals fed to the recurrences.
use clap::{Args, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal, NormalError};
use recurrence::Real;
use std::f64::consts::TAU;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub(crate) enum SignalError {
    #[error("Invalid Normal Distribution: {0}")]
    NormalDistribution(#[from] NormalError),
    #[error("Noise standard deviation must be finite and non-negative, found {0}")]
    NoiseSd(Real),
    #[error("Sample time must be finite and positive, found {0}")]
    SampleTime(Real),
    #[error("Signal must contain at least one sample")]
    Empty,
}

/// Determines the shape of the synthesised signal.
#[derive(Default, Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SignalKind {
    /// A pure sine wave.
    #[default]
    Sine,
    /// A sine wave with additive Gaussian noise.
    NoisySine,
    /// Zero mean Gaussian noise.
    GaussianNoise,
    /// Cumulative sum of Gaussian steps.
    RandomWalk,
}

/// [clap] derived struct describing the signal.
#[derive(Debug, Clone, Args)]
pub(crate) struct SignalParameters {
    /// Shape of the signal
    #[clap(long = "signal", default_value = "sine")]
    pub(crate) kind: SignalKind,

    /// Number of samples
    #[clap(long, default_value = "500")]
    pub(crate) length: usize,

    /// Time between consecutive samples
    #[clap(long, default_value = "0.01")]
    pub(crate) sample_time: Real,

    /// Peak amplitude of the sine component
    #[clap(long, default_value = "1")]
    pub(crate) amplitude: Real,

    /// Period of the sine component
    #[clap(long, default_value = "1")]
    pub(crate) period: Real,

    /// Standard deviation of the Gaussian component
    #[clap(long, default_value = "0.1")]
    pub(crate) noise_sd: Real,

    /// Seed for the noise generator. If not set, the generator is seeded from the OS
    #[clap(long, env = "RECURRENCE_SEED")]
    pub(crate) seed: Option<u64>,
}

/// A sample of the signal.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sample {
    pub(crate) time: Real,
    pub(crate) value: Real,
}

/// Generates the signal described by `parameters`.
///
/// # Parameters
/// - parameters: the shape, length and noise of the signal.
#[instrument(skip_all, level = "debug", fields(kind = ?parameters.kind, length = parameters.length), err(level = "warn"))]
pub(crate) fn synthesise(parameters: &SignalParameters) -> Result<Vec<Sample>, SignalError> {
    if parameters.length == 0 {
        return Err(SignalError::Empty);
    }
    if !parameters.sample_time.is_finite() || parameters.sample_time <= 0.0 {
        return Err(SignalError::SampleTime(parameters.sample_time));
    }
    if !parameters.noise_sd.is_finite() || parameters.noise_sd < 0.0 {
        return Err(SignalError::NoiseSd(parameters.noise_sd));
    }
    let noise = Normal::new(0.0, parameters.noise_sd)?;
    let mut rng = match parameters.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let sine = |time: Real| parameters.amplitude * Real::sin(TAU * time / parameters.period);

    let mut walk = 0.0;
    let samples = (0..parameters.length)
        .map(|i| {
            let time = i as Real * parameters.sample_time;
            let value = match parameters.kind {
                SignalKind::Sine => sine(time),
                SignalKind::NoisySine => sine(time) + noise.sample(&mut rng),
                SignalKind::GaussianNoise => noise.sample(&mut rng),
                SignalKind::RandomWalk => {
                    walk += noise.sample(&mut rng);
                    walk
                }
            };
            Sample { time, value }
        })
        .collect::<Vec<_>>();
    debug!("Synthesised {} samples", samples.len());
    Ok(samples)
}
