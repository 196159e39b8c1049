//! # Recurrence
//!
//! Evaluates dynamic systems with unlimited memory: recursive update rules of the form
//! `h_p = f(h_{p-1}, x_p)`, in which a single hidden state summarises every input seen so far.
//!
//! * A [Recurrence] supplies the combination function `f`, plus how the first state is seeded.
//! * A [RecurrenceIter] applies a rule lazily to any iterator, holding only the live hidden state
//!   and the step counter.
//! * Rules compose with [Recurrence::stack], feeding the hidden states of one system into the next.
//!
//! ```rust
//! use recurrence::{RecurrenceIterable, RunningMean, RunningVariance};
//!
//! let means = [2.0, 4.0]
//!     .into_iter()
//!     .recur(RunningMean::new())
//!     .collect::<Result<Vec<f64>, _>>()?;
//! assert_eq!(means, vec![2.0, 3.0]);
//!
//! let stats = recurrence::evaluate([2.0, 4.0], RunningVariance::new())?;
//! assert_eq!(stats.last().map(|stats| stats.variance), Some(1.0));
//! # Ok::<(), recurrence::RecurrenceError>(())
//! ```
pub mod error;
pub mod iterators;
pub mod rules;

#[cfg(test)]
mod testing;

pub use error::{CombinationError, RecurrenceError, Result};
pub use iterators::{
    PartialEvaluation, RecurrenceIter, RecurrenceIterable, evaluate, evaluate_prefix,
};
pub use rules::{
    BinGrid, ExponentialAverage, FnRecurrence, Histogram, Recurrence, RiemannSum,
    RunningHistogram, RunningMax, RunningMean, RunningMin, RunningSum, RunningVariance, Stacked,
    Stats, ZeroCrossingState, ZeroCrossings, from_fn,
};

/// Default scalar type of the hidden states.
pub type Real = f64;

/// Index of an input within its sequence, counting from one.
pub type Step = usize;
