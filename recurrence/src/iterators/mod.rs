//! Provides iterators which drive a [Recurrence] over an input sequence, and eager helpers built on them.
pub(crate) mod recurrence;

use crate::{Recurrence, RecurrenceError, Result};
pub use recurrence::{RecurrenceIter, RecurrenceIterable};
use tracing::instrument;

/// The hidden states computed before a run stopped, and the error which stopped it, if any.
#[derive(Debug)]
pub struct PartialEvaluation<O> {
    pub states: Vec<O>,
    pub error: Option<RecurrenceError>,
}

impl<O> PartialEvaluation<O> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Discards the prefix if the run failed.
    pub fn into_result(self) -> Result<Vec<O>> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.states),
        }
    }
}

/// Applies `rule` to every input and collects the hidden states.
///
/// # Parameters
/// - inputs: the ordered input sequence, must be non-empty.
/// - rule: the recurrence to apply.
#[instrument(skip_all, level = "debug", err(level = "warn"))]
pub fn evaluate<X, R>(inputs: X, rule: R) -> Result<Vec<R::Output>>
where
    X: IntoIterator<Item = R::Input>,
    R: Recurrence,
{
    inputs.into_iter().recur(rule).collect()
}

/// Applies `rule` to every input, keeping the states computed before any failure.
///
/// # Parameters
/// - inputs: the ordered input sequence, must be non-empty.
/// - rule: the recurrence to apply.
#[instrument(skip_all, level = "debug", fields(num_states))]
pub fn evaluate_prefix<X, R>(inputs: X, rule: R) -> PartialEvaluation<R::Output>
where
    X: IntoIterator<Item = R::Input>,
    R: Recurrence,
{
    let mut states = Vec::new();
    let mut error = None;
    for result in inputs.into_iter().recur(rule) {
        match result {
            Ok(state) => states.push(state),
            Err(e) => error = Some(e),
        }
    }
    tracing::Span::current().record("num_states", states.len());
    PartialEvaluation { states, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BinGrid, Real, RunningHistogram, RunningSum};

    #[test]
    fn evaluate_collects_every_state() -> Result<()> {
        assert_eq!(
            evaluate(vec![1.0, 2.0, 3.0], RunningSum::new())?,
            vec![1.0, 3.0, 6.0]
        );
        Ok(())
    }

    #[test]
    fn evaluate_rejects_empty_input() {
        assert!(matches!(
            evaluate(Vec::<Real>::new(), RunningSum::new()),
            Err(RecurrenceError::EmptyInput)
        ));
    }

    #[test]
    fn prefix_survives_failure() -> Result<()> {
        let rule = RunningHistogram::new(0.5, BinGrid::new(0.0, 1.0, 1)?)?;
        let partial = evaluate_prefix([0.1, 0.2, Real::NAN, 0.3], rule);
        assert!(!partial.is_complete());
        assert_eq!(partial.states.len(), 2);
        assert!(matches!(
            partial.error,
            Some(RecurrenceError::Arithmetic { step: 3, .. })
        ));
        assert!(partial.into_result().is_err());
        Ok(())
    }

    #[test]
    fn complete_prefix_converts_to_states() -> Result<()> {
        let partial = evaluate_prefix([2.0, 2.0], RunningSum::new());
        assert!(partial.is_complete());
        assert_eq!(partial.into_result()?, vec![2.0, 4.0]);
        Ok(())
    }
}
