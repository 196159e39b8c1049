//! Accumulating rules: the running sum and its scaled form, the Riemann sum.
use super::{Recurrence, as_reported};
use crate::{RecurrenceError, Result, Step};
use num::Float;
use std::marker::PhantomData;

/// `h_p = h_{p-1} + x_p`, seeded with `x_1`.
#[derive(Debug, Clone, Copy)]
pub struct RunningSum<T> {
    _value: PhantomData<T>,
}

impl<T: Float> RunningSum<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: Float> Default for RunningSum<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for RunningSum<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first)
    }

    fn combine(&self, previous: T, input: T, _step: Step) -> Result<T> {
        Ok(previous + input)
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}

/// `h_p = h_{p-1} + x_p / T`, seeded with `x_1 / T`.
///
/// If the inputs are evaluations of a function at `T` equally spaced points per unit
/// interval, the hidden state approximates the definite integral of the function.
#[derive(Debug, Clone, Copy)]
pub struct RiemannSum<T> {
    samples_per_unit: T,
}

impl<T: Float> RiemannSum<T> {
    /// Creates a Riemann sum.
    ///
    /// # Parameters
    /// - samples_per_unit: number of samples in each unit interval, must be finite and positive.
    pub fn new(samples_per_unit: T) -> Result<Self> {
        if !samples_per_unit.is_finite() || samples_per_unit <= T::zero() {
            return Err(RecurrenceError::invalid_parameter(
                "samples_per_unit",
                as_reported(samples_per_unit),
                "must be finite and greater than zero",
            ));
        }
        Ok(Self { samples_per_unit })
    }

    pub fn samples_per_unit(&self) -> T {
        self.samples_per_unit
    }
}

impl<T: Float> Recurrence for RiemannSum<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first / self.samples_per_unit)
    }

    fn combine(&self, previous: T, input: T, _step: Step) -> Result<T> {
        Ok(previous + input / self.samples_per_unit)
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}
