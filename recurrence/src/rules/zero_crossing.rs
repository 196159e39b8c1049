//! Counts how often a signal crosses, or touches, zero.
use super::Recurrence;
use crate::{Result, Step};
use num::Float;
use std::marker::PhantomData;

/// Hidden state of [ZeroCrossings].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ZeroCrossingState<T> {
    /// Number of crossings registered so far.
    pub count: usize,
    /// The previous raw input.
    pub previous: T,
}

/// `h_p = h_{p-1} + 1` whenever the pair `(x_{p-1}, x_p)` straddles zero, otherwise `h_p = h_{p-1}`.
///
/// Both comparisons are non-strict, so an exact zero straddles zero from either side.
/// Consequently a run of exact zeros registers a crossing on every step.
#[derive(Debug, Clone, Copy)]
pub struct ZeroCrossings<T> {
    _value: PhantomData<T>,
}

impl<T: Float> ZeroCrossings<T> {
    pub fn new() -> Self {
        Self {
            _value: PhantomData,
        }
    }

    fn straddles_zero(previous: T, current: T) -> bool {
        let zero = T::zero();
        (previous <= zero && current >= zero) || (previous >= zero && current <= zero)
    }
}

impl<T: Float> Default for ZeroCrossings<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Recurrence for ZeroCrossings<T> {
    type Input = T;
    type State = ZeroCrossingState<T>;
    type Output = usize;

    fn seed(&self, first: T) -> Result<Self::State> {
        Ok(ZeroCrossingState {
            count: 0,
            previous: first,
        })
    }

    fn combine(&self, previous: Self::State, input: T, _step: Step) -> Result<Self::State> {
        let crossed = Self::straddles_zero(previous.previous, input);
        Ok(ZeroCrossingState {
            count: previous.count + usize::from(crossed),
            previous: input,
        })
    }

    fn output(&self, state: &Self::State) -> usize {
        state.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Real, RecurrenceIterable};

    fn crossings(data: &[Real]) -> Result<Vec<usize>> {
        data.iter().copied().recur(ZeroCrossings::new()).collect()
    }

    #[test]
    fn touching_and_crossing_zero() -> Result<()> {
        // (0,1) touches, (1,-1) crosses, (-1,0) touches, (0,1) touches.
        assert_eq!(crossings(&[0.0, 1.0, -1.0, 0.0, 1.0])?, vec![0, 1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn same_sign_never_crosses() -> Result<()> {
        assert_eq!(crossings(&[1.0, 2.0, 3.0, 0.5])?, vec![0, 0, 0, 0]);
        assert_eq!(crossings(&[-1.0, -2.0, -0.1])?, vec![0, 0, 0]);
        Ok(())
    }

    #[test]
    fn run_of_zeros_counts_every_step() -> Result<()> {
        assert_eq!(crossings(&[0.0, 0.0, 0.0])?, vec![0, 1, 2]);
        Ok(())
    }

    #[test]
    fn sine_wave_crosses_twice_per_period() -> Result<()> {
        // Offset phase so that no sample is exactly zero.
        let data = (0..1000)
            .map(|i| (2.0 * std::f64::consts::PI * (i as Real + 0.5) / 100.0).sin())
            .collect::<Vec<_>>();
        assert_eq!(crossings(&data)?.last().copied(), Some(19));
        Ok(())
    }
}
