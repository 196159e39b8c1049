//! Averaging rules.
use super::{Recurrence, as_reported, running_weights};
use crate::{RecurrenceError, Result, Step};
use num::Float;
use std::marker::PhantomData;

/// `h_p = ((p - 1)/p) h_{p-1} + (1/p) x_p`, the arithmetic mean of the inputs so far.
///
/// The step counter `p` is supplied by the evaluator, so the hidden state is just the mean.
#[derive(Debug, Clone, Copy)]
pub struct RunningMean<T> {
    _value: PhantomData<T>,
}

impl<T: Float> RunningMean<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: Float> Default for RunningMean<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for RunningMean<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first)
    }

    fn combine(&self, previous: T, input: T, step: Step) -> Result<T> {
        let (persistence, novelty) = running_weights::<T>(step)?;
        Ok(persistence * previous + novelty * input)
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}

/// `h_p = α h_{p-1} + (1 - α) x_p`, with `α` fixed.
///
/// `α = 1` never forgets the first input, `α = 0` passes every input straight through.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialAverage<T> {
    alpha: T,
}

impl<T: Float> ExponentialAverage<T> {
    /// Creates an exponential average.
    ///
    /// # Parameters
    /// - alpha: the persistence of the previous state, must lie in `[0, 1]`.
    pub fn new(alpha: T) -> Result<Self> {
        if !(T::zero()..=T::one()).contains(&alpha) {
            return Err(RecurrenceError::invalid_parameter(
                "alpha",
                as_reported(alpha),
                "must lie in the closed interval [0, 1]",
            ));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }
}

impl<T: Float> Recurrence for ExponentialAverage<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first)
    }

    fn combine(&self, previous: T, input: T, _step: Step) -> Result<T> {
        Ok(self.alpha * previous + (T::one() - self.alpha) * input)
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}
