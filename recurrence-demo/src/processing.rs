//! Applies the recurrence selected on the command line to the synthesised signal.
use crate::{
    output::{State, Table},
    parameters::{HistogramParameters, Mode},
    signal::Sample,
};
use recurrence::{
    BinGrid, ExponentialAverage, PartialEvaluation, Real, Recurrence, RecurrenceError,
    RiemannSum, RunningHistogram, RunningMax, RunningMean, RunningMin, RunningSum,
    RunningVariance, ZeroCrossings, evaluate_prefix,
};
use std::num::NonZeroUsize;
use tracing::{debug, info, instrument, trace};

/// The rows computed before evaluation stopped, and the error which stopped it, if any.
pub(crate) struct Outcome {
    pub(crate) table: Table,
    pub(crate) error: Option<RecurrenceError>,
}

impl Outcome {
    fn new<S: Into<State>>(
        columns: &[&str],
        samples: &[Sample],
        evaluation: PartialEvaluation<S>,
    ) -> Self {
        let columns = columns.iter().map(|&column| column.to_owned()).collect();
        Self {
            table: Table::new(columns, samples, evaluation.states),
            error: evaluation.error,
        }
    }
}

/// Applies `rule` to the samples `depth` times, each pass consuming the hidden states of the last.
///
/// The first error encountered is kept. Later passes still run over the prefix computed before it.
fn evaluate_layers<R>(samples: &[Sample], rule: R, depth: NonZeroUsize) -> PartialEvaluation<Real>
where
    R: Recurrence<Input = Real, Output = Real> + Copy,
{
    let first = evaluate_prefix(samples.iter().map(|sample| sample.value), rule);
    (1..depth.get()).fold(first, |lower, layer| {
        trace!(layer, "Applying next layer");
        let upper = evaluate_prefix(lower.states, rule);
        PartialEvaluation {
            states: upper.states,
            error: lower.error.or(upper.error),
        }
    })
}

fn histogram_columns(grid: &BinGrid) -> Vec<String> {
    let precision = grid.precision() as usize;
    std::iter::once("mode".to_owned())
        .chain(grid.labels().map(|label| format!("{label:.precision$}")))
        .collect()
}

fn process_histogram(parameters: &HistogramParameters, samples: &[Sample]) -> Result<Outcome, RecurrenceError> {
    let grid = BinGrid::new(parameters.lo, parameters.hi, parameters.precision)?;
    debug!("Histogram has {} bins", grid.len());
    let columns = histogram_columns(&grid);
    let rule = RunningHistogram::new(parameters.alpha, grid)?;
    let evaluation = evaluate_prefix(samples.iter().map(|sample| sample.value), rule);
    Ok(Outcome {
        table: Table::new(columns, samples, evaluation.states),
        error: evaluation.error,
    })
}

/// Evaluates the recurrence selected by `mode` over the samples.
///
/// Returns an error only if the recurrence cannot be constructed. Errors raised during
/// evaluation are returned in the [Outcome], alongside the rows computed before them.
///
/// # Parameters
/// - mode: the recurrence and its parameters.
/// - samples: the input signal.
/// - sample_time: the time between samples, from which the default Riemann sum resolution is taken.
#[instrument(skip_all, level = "info", fields(num_samples = samples.len()), err(level = "warn"))]
pub(crate) fn process(mode: &Mode, samples: &[Sample], sample_time: Real) -> Result<Outcome, RecurrenceError> {
    let values = || samples.iter().map(|sample| sample.value);
    let outcome = match mode {
        Mode::Sum(stack) => Outcome::new(
            &["sum"],
            samples,
            evaluate_layers(samples, RunningSum::new(), stack.depth),
        ),
        Mode::Mean(stack) => Outcome::new(
            &["mean"],
            samples,
            evaluate_layers(samples, RunningMean::new(), stack.depth),
        ),
        Mode::ExponentialAverage(parameters) => Outcome::new(
            &["exponential_average"],
            samples,
            evaluate_layers(
                samples,
                ExponentialAverage::new(parameters.alpha)?,
                parameters.stack.depth,
            ),
        ),
        Mode::RiemannSum(parameters) => {
            let samples_per_unit = parameters.samples_per_unit.unwrap_or(1.0 / sample_time);
            Outcome::new(
                &["integral"],
                samples,
                evaluate_layers(
                    samples,
                    RiemannSum::new(samples_per_unit)?,
                    parameters.stack.depth,
                ),
            )
        }
        Mode::Max(stack) => Outcome::new(
            &["max"],
            samples,
            evaluate_layers(samples, RunningMax::new(), stack.depth),
        ),
        Mode::Min(stack) => Outcome::new(
            &["min"],
            samples,
            evaluate_layers(samples, RunningMin::new(), stack.depth),
        ),
        Mode::ZeroCrossings => Outcome::new(
            &["crossings"],
            samples,
            evaluate_prefix(values(), ZeroCrossings::new()),
        ),
        Mode::Histogram(parameters) => process_histogram(parameters, samples)?,
        Mode::Variance => Outcome::new(
            &["mean", "variance"],
            samples,
            evaluate_prefix(values(), RunningVariance::new()),
        ),
    };
    info!(
        num_rows = outcome.table.rows.len(),
        complete = outcome.error.is_none(),
        "Evaluation finished"
    );
    Ok(outcome)
}
