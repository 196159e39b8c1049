//! Running extrema.
//!
//! The state is replaced only when the input compares strictly beyond it, so a NaN
//! input never displaces a number (though a NaN first input is never displaced either).
use super::Recurrence;
use crate::{Result, Step};
use num::Float;
use std::marker::PhantomData;

/// `h_p = max(h_{p-1}, x_p)`, seeded with `x_1`.
#[derive(Debug, Clone, Copy)]
pub struct RunningMax<T> {
    _value: PhantomData<T>,
}

impl<T: Float> RunningMax<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: Float> Default for RunningMax<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for RunningMax<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first)
    }

    fn combine(&self, previous: T, input: T, _step: Step) -> Result<T> {
        Ok(if input > previous { input } else { previous })
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}

/// `h_p = min(h_{p-1}, x_p)`, seeded with `x_1`.
#[derive(Debug, Clone, Copy)]
pub struct RunningMin<T> {
    _value: PhantomData<T>,
}

impl<T: Float> RunningMin<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }
}

impl<T: Float> Default for RunningMin<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for RunningMin<T> {
    type Input = T;
    type State = T;
    type Output = T;

    fn seed(&self, first: T) -> Result<T> {
        Ok(first)
    }

    fn combine(&self, previous: T, input: T, _step: Step) -> Result<T> {
        Ok(if input < previous { input } else { previous })
    }

    fn output(&self, state: &T) -> T {
        *state
    }
}
