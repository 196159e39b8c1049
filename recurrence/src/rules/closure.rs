//! Builds a [Recurrence] from a pair of closures.
use super::Recurrence;
use crate::{Result, Step};
use std::marker::PhantomData;

/// A rule whose seed and combination functions are supplied by the caller.
///
/// Created by [from_fn]. The hidden state is also the output.
pub struct FnRecurrence<X, S, Seed, Combine> {
    seed: Seed,
    combine: Combine,
    _signature: PhantomData<fn(X) -> S>,
}

impl<X, S, Seed, Combine> Clone for FnRecurrence<X, S, Seed, Combine>
where
    Seed: Clone,
    Combine: Clone,
{
    fn clone(&self) -> Self {
        Self {
            seed: self.seed.clone(),
            combine: self.combine.clone(),
            _signature: PhantomData,
        }
    }
}

/// Creates a [FnRecurrence].
///
/// # Parameters
/// - seed: derives the first hidden state from the first input.
/// - combine: takes the previous hidden state, the current input and the step index.
///
/// Errors returned by either closure are yielded by the evaluator unchanged.
///
/// # Example
/// ```rust
/// use recurrence::{RecurrenceIterable, from_fn};
///
/// // Counts how many inputs exceeded every input before them.
/// let records = from_fn(
///     |x: i32| Ok((x, 0u32)),
///     |(best, count): (i32, u32), x: i32, _step| {
///         Ok(if x > best { (x, count + 1) } else { (best, count) })
///     },
/// );
/// let counts = [3, 1, 4, 1, 5]
///     .into_iter()
///     .recur(records)
///     .map(|state| state.map(|(_, count)| count))
///     .collect::<Result<Vec<_>, _>>()?;
/// assert_eq!(counts, vec![0, 0, 1, 1, 2]);
/// # Ok::<(), recurrence::RecurrenceError>(())
/// ```
pub fn from_fn<X, S, Seed, Combine>(seed: Seed, combine: Combine) -> FnRecurrence<X, S, Seed, Combine>
where
    Seed: Fn(X) -> Result<S> + Clone,
    Combine: Fn(S, X, Step) -> Result<S> + Clone,
    S: Clone,
{
    FnRecurrence {
        seed,
        combine,
        _signature: PhantomData,
    }
}

impl<X, S, Seed, Combine> Recurrence for FnRecurrence<X, S, Seed, Combine>
where
    Seed: Fn(X) -> Result<S> + Clone,
    Combine: Fn(S, X, Step) -> Result<S> + Clone,
    S: Clone,
{
    type Input = X;
    type State = S;
    type Output = S;

    fn seed(&self, first: X) -> Result<S> {
        (self.seed)(first)
    }

    fn combine(&self, previous: S, input: X, step: Step) -> Result<S> {
        (self.combine)(previous, input, step)
    }

    fn output(&self, state: &S) -> S {
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Real, RecurrenceError, RecurrenceIterable, RunningMean, evaluate, testing::random_sequence,
    };
    use assert_approx_eq::assert_approx_eq;
    use std::fmt;

    #[derive(Debug)]
    struct NegativeInput(Step);

    impl fmt::Display for NegativeInput {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "negative input at step {}", self.0)
        }
    }

    impl std::error::Error for NegativeInput {}

    #[test]
    fn closure_mean_matches_builtin() -> Result<()> {
        let data = random_sequence(9, 100);
        let mean = from_fn(Ok, |h: Real, x: Real, p: Step| {
            let p = p as Real;
            Ok((p - 1.0) / p * h + x / p)
        });
        let by_closure = evaluate(data.iter().copied(), mean)?;
        let builtin = evaluate(data.iter().copied(), RunningMean::new())?;
        for (a, b) in by_closure.into_iter().zip(builtin) {
            assert_approx_eq!(a, b, 1e-12);
        }
        Ok(())
    }

    #[test]
    fn closure_errors_pass_through_unchanged() {
        let square_root_sum = from_fn(
            |x: Real| Ok(x.sqrt()),
            |h: Real, x: Real, step: Step| {
                if x < 0.0 {
                    Err(RecurrenceError::Combination(Box::new(NegativeInput(step))))
                } else {
                    Ok(h + x.sqrt())
                }
            },
        );
        let results = [4.0, 9.0, -1.0, 16.0]
            .into_iter()
            .recur(square_root_sum)
            .collect::<Vec<_>>();
        assert_eq!(results.len(), 3);
        assert!(matches!(results.first(), Some(Ok(h)) if *h == 2.0));
        assert!(matches!(results.get(1), Some(Ok(h)) if *h == 5.0));
        assert!(matches!(
            results.last(),
            Some(Err(RecurrenceError::Combination(error)))
                if error.to_string() == "negative input at step 3"
                    && error.downcast_ref::<NegativeInput>().is_some_and(|e| e.0 == 3)
        ));
    }
}
