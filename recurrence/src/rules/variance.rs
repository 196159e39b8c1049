//! Running variance, computed by two coupled recursions.
use super::{Recurrence, running_weights};
use crate::{Result, Step};
use num::Float;
use std::marker::PhantomData;

/// This type contains descriptive statistical data.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Stats<T> {
    /// The current value.
    pub value: T,
    /// The arithmetic mean of all values so far.
    pub mean: T,
    /// The population variance of all values so far.
    pub variance: T,
}

impl<T: Float> Stats<T> {
    pub fn standard_deviation(&self) -> T {
        self.variance.sqrt()
    }
}

impl<T: Float> From<T> for Stats<T> {
    fn from(value: T) -> Self {
        Stats {
            value,
            mean: value,
            variance: T::zero(),
        }
    }
}

/// Tracks the running mean and population variance.
///
/// ```text
/// h_ave = ((p - 1)/p) h_ave' + (1/p) x
/// h_var = ((p - 1)/p) h_var' + (1/p) (x - h_ave) (x - h_ave')
/// ```
/// where primes denote the previous step.
#[derive(Debug, Clone, Copy)]
pub struct RunningVariance<T> {
    _value: PhantomData<T>,
}

impl<T: Float> RunningVariance<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: Float> Default for RunningVariance<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for RunningVariance<T> {
    type Input = T;
    type State = Stats<T>;
    type Output = Stats<T>;

    fn seed(&self, first: T) -> Result<Stats<T>> {
        Ok(Stats::from(first))
    }

    fn combine(&self, previous: Stats<T>, input: T, step: Step) -> Result<Stats<T>> {
        let (persistence, novelty) = running_weights::<T>(step)?;
        let mean = persistence * previous.mean + novelty * input;
        let variance = persistence * previous.variance
            + novelty * (input - mean) * (input - previous.mean);
        Ok(Stats {
            value: input,
            mean,
            variance,
        })
    }

    fn output(&self, state: &Stats<T>) -> Stats<T> {
        *state
    }
}
