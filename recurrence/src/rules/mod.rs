//! Defines [Recurrence] rules, which fold one input at a time into a hidden state.
//!
//! Every rule is a substitution of the combination function `h_p = f(h_{p-1}, x_p, p)`.
//! Rules hold only their fixed parameters; the hidden state is owned by the
//! [RecurrenceIter](crate::RecurrenceIter) driving them and is moved in and out of
//! [Recurrence::combine] on every step.
//!
//! # Example
//!
//! The following smooths a signal with an exponential average and then tracks the
//! running maximum of the smoothed values.
//! ```rust
//! use recurrence::{ExponentialAverage, Recurrence, RecurrenceIterable, RunningMax};
//!
//! let peaks = [0.0, 4.0, 1.0, 3.0]
//!     .into_iter()
//!     .recur(ExponentialAverage::new(0.5)?.stack(RunningMax::new()))
//!     .collect::<Result<Vec<f64>, _>>()?;
//! assert_eq!(peaks, vec![0.0, 2.0, 2.0, 2.25]);
//! # Ok::<(), recurrence::RecurrenceError>(())
//! ```

pub mod closure;
pub mod extremum;
pub mod histogram;
pub mod mean;
pub mod stacked;
pub mod sum;
pub mod variance;
pub mod zero_crossing;

use crate::{RecurrenceError, Result, Step};
pub use closure::{FnRecurrence, from_fn};
pub use extremum::{RunningMax, RunningMin};
pub use histogram::{BinGrid, Histogram, RunningHistogram};
pub use mean::{ExponentialAverage, RunningMean};
use num::{Float, NumCast};
pub use stacked::Stacked;
pub use sum::{RiemannSum, RunningSum};
pub use variance::{RunningVariance, Stats};
pub use zero_crossing::{ZeroCrossingState, ZeroCrossings};

/// Implement for update rules of a dynamic system with unlimited memory.
pub trait Recurrence: Clone {
    /// Type of each element of the input sequence.
    type Input;
    /// The hidden state carried from one step to the next.
    type State;
    /// The value handed to the consumer after each step.
    type Output;

    /// Derives the hidden state at step 1 from the first input.
    fn seed(&self, first: Self::Input) -> Result<Self::State>;

    /// Consumes the previous hidden state and the input at `step`, and returns the next hidden state.
    ///
    /// `step` counts from 1. It is 1 only when the evaluator was given an explicit initial state.
    fn combine(&self, previous: Self::State, input: Self::Input, step: Step) -> Result<Self::State>;

    /// Extracts the consumer facing value of a hidden state.
    fn output(&self, state: &Self::State) -> Self::Output;

    /// Creates a deeper system, in which the outputs of this rule are the inputs of `next`.
    fn stack<R>(self, next: R) -> Stacked<Self, R>
    where
        R: Recurrence<Input = Self::Output>,
    {
        Stacked::new(self, next)
    }
}

/// Converts a step index into the float type used by a rule.
pub(crate) fn step_as<T: Float>(step: Step) -> Result<T> {
    <T as NumCast>::from(step).ok_or(RecurrenceError::Arithmetic {
        step,
        reason: "step index is not representable as a float",
    })
}

/// Weights `(p - 1)/p` and `1/p` shared by the running mean and variance.
pub(crate) fn running_weights<T: Float>(step: Step) -> Result<(T, T)> {
    let p = step_as::<T>(step)?;
    Ok(((p - T::one()) / p, p.recip()))
}

/// Reports a float parameter in an error message.
pub(crate) fn as_reported<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}
