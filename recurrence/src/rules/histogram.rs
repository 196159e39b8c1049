//! An exponentially forgetting histogram over a fixed grid of bins.
//!
//! Inputs are rounded to the grid's decimal precision (half to even) and clamped
//! to `[lo, hi]`. Values beyond the bounds saturate into the boundary bins, so the
//! histogram cannot tell how far out of range they were.
use super::Recurrence;
use crate::{Real, RecurrenceError, Result, Step};
use std::sync::Arc;
use tracing::instrument;

/// Largest number of bins a [BinGrid] may enumerate.
pub const MAX_BINS: usize = 1 << 20;
/// Largest number of decimal places a [BinGrid] may resolve.
pub const MAX_PRECISION: u32 = 6;

/// Mantissa limit, beyond which grid indices stop being exact integers.
const EXACT_INTEGER_LIMIT: Real = 9_007_199_254_740_992.0;

/// A uniform grid of bin labels spaced `10^-precision` apart.
#[derive(Debug, Clone, PartialEq)]
pub struct BinGrid {
    /// Index of the lowest bin, in units of the bin width.
    first: i64,
    /// Number of bins.
    len: usize,
    /// Number of bins per unit, i.e. `10^precision`.
    scale: Real,
    precision: u32,
}

impl BinGrid {
    /// Enumerates the grid points of `[lo, hi]` at the given precision.
    ///
    /// # Parameters
    /// - lo: lower bound, rounded up onto the grid.
    /// - hi: upper bound, rounded down onto the grid.
    /// - precision: the number of decimal places of each bin label.
    #[instrument(level = "debug", err(level = "warn"))]
    pub fn new(lo: Real, hi: Real, precision: u32) -> Result<Self> {
        if precision > MAX_PRECISION {
            return Err(RecurrenceError::invalid_parameter(
                "precision",
                precision.into(),
                "too many decimal places",
            ));
        }
        if !lo.is_finite() {
            return Err(RecurrenceError::invalid_parameter(
                "lo",
                lo,
                "must be finite",
            ));
        }
        if !hi.is_finite() || hi <= lo {
            return Err(RecurrenceError::invalid_parameter(
                "hi",
                hi,
                "must be finite and greater than lo",
            ));
        }
        let scale = Real::powi(10.0, precision as i32);
        let first = (lo * scale).ceil();
        let last = (hi * scale).floor();
        if first.abs() >= EXACT_INTEGER_LIMIT {
            return Err(RecurrenceError::invalid_parameter(
                "lo",
                lo,
                "too large in magnitude for the requested precision",
            ));
        }
        if last.abs() >= EXACT_INTEGER_LIMIT {
            return Err(RecurrenceError::invalid_parameter(
                "hi",
                hi,
                "too large in magnitude for the requested precision",
            ));
        }
        if last < first {
            return Err(RecurrenceError::invalid_parameter(
                "hi",
                hi,
                "interval contains no grid point",
            ));
        }
        let len = last - first + 1.0;
        if len > MAX_BINS as Real {
            return Err(RecurrenceError::invalid_parameter(
                "hi",
                hi,
                "interval contains too many bins",
            ));
        }
        Ok(Self {
            first: first as i64,
            len: len as usize,
            scale,
            precision,
        })
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A grid always contains at least one bin.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// The value represented by the bin at `index`.
    pub fn label(&self, index: usize) -> Real {
        (self.first + index as i64) as Real / self.scale
    }

    /// Iterates over every bin label in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = Real> + '_ {
        (0..self.len).map(|index| self.label(index))
    }

    /// Rounds and clamps `value` onto the grid, returning its bin index.
    ///
    /// Returns [None] only for NaN.
    pub fn index_of(&self, value: Real) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        let last = self.first + self.len as i64 - 1;
        let rounded = (value * self.scale).round_ties_even();
        let clamped = rounded.clamp(self.first as Real, last as Real) as i64;
        Some((clamped - self.first) as usize)
    }
}

/// A snapshot of the histogram weights, one per bin of a [BinGrid].
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    grid: Arc<BinGrid>,
    weights: Vec<Real>,
}

impl Histogram {
    /// A histogram with unit mass in the bin at `index`.
    fn concentrated(grid: Arc<BinGrid>, index: usize) -> Self {
        let weights = (0..grid.len())
            .map(|i| if i == index { 1.0 } else { 0.0 })
            .collect();
        Self { grid, weights }
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    pub fn weights(&self) -> &[Real] {
        &self.weights
    }

    /// The weight of the bin containing `value`.
    pub fn weight_of(&self, value: Real) -> Option<Real> {
        self.grid
            .index_of(value)
            .and_then(|index| self.weights.get(index).copied())
    }

    /// Sum of all weights, which remains one up to rounding.
    pub fn total(&self) -> Real {
        self.weights.iter().sum()
    }

    /// The label of the heaviest bin. Ties go to the lowest label.
    pub fn mode(&self) -> Real {
        let (index, _) = self
            .weights
            .iter()
            .enumerate()
            .fold((0, Real::NEG_INFINITY), |(best, max), (index, &weight)| {
                if weight > max {
                    (index, weight)
                } else {
                    (best, max)
                }
            });
        self.grid.label(index)
    }

    /// Iterates over `(label, weight)` pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (Real, Real)> + '_ {
        self.grid.labels().zip(self.weights.iter().copied())
    }
}

/// For every bin `k`, `w_k <- (1 - α) w_k`, then `w_{bin(x)} <- w_{bin(x)} + α`.
///
/// The histogram is seeded with unit mass in the bin of `x_1`, and each update
/// preserves the total mass.
#[derive(Debug, Clone)]
pub struct RunningHistogram {
    alpha: Real,
    grid: Arc<BinGrid>,
}

impl RunningHistogram {
    /// Creates a running histogram.
    ///
    /// # Parameters
    /// - alpha: the weight given to each new input, must lie in `[0, 1]`.
    /// - grid: the fixed set of bins.
    pub fn new(alpha: Real, grid: BinGrid) -> Result<Self> {
        if !(0.0..=1.0).contains(&alpha) {
            return Err(RecurrenceError::invalid_parameter(
                "alpha",
                alpha,
                "must lie in the closed interval [0, 1]",
            ));
        }
        Ok(Self {
            alpha,
            grid: Arc::new(grid),
        })
    }

    pub fn alpha(&self) -> Real {
        self.alpha
    }

    pub fn grid(&self) -> &BinGrid {
        &self.grid
    }

    /// A histogram on this rule's grid with every weight zero.
    ///
    /// Suitable as the explicit initial state of [recur_from](crate::RecurrenceIterable::recur_from).
    /// The total mass then grows towards one as `1 - (1 - α)^p`.
    pub fn empty(&self) -> Histogram {
        Histogram {
            grid: self.grid.clone(),
            weights: vec![0.0; self.grid.len()],
        }
    }

    /// A histogram on this rule's grid with unit mass spread evenly over every bin.
    pub fn uniform(&self) -> Histogram {
        let weight = (self.grid.len() as Real).recip();
        Histogram {
            grid: self.grid.clone(),
            weights: vec![weight; self.grid.len()],
        }
    }

    fn bin(&self, value: Real, step: Step) -> Result<usize> {
        self.grid.index_of(value).ok_or(RecurrenceError::Arithmetic {
            step,
            reason: "NaN input has no histogram bin",
        })
    }
}

impl Recurrence for RunningHistogram {
    type Input = Real;
    type State = Histogram;
    type Output = Histogram;

    fn seed(&self, first: Real) -> Result<Histogram> {
        let index = self.bin(first, 1)?;
        Ok(Histogram::concentrated(self.grid.clone(), index))
    }

    fn combine(&self, previous: Histogram, input: Real, step: Step) -> Result<Histogram> {
        if !Arc::ptr_eq(&previous.grid, &self.grid) && *previous.grid != *self.grid {
            return Err(RecurrenceError::Arithmetic {
                step,
                reason: "histogram state was built on a different bin grid",
            });
        }
        let index = self.bin(input, step)?;
        let mut histogram = previous;
        let decay = 1.0 - self.alpha;
        for weight in histogram.weights.iter_mut() {
            *weight *= decay;
        }
        if let Some(weight) = histogram.weights.get_mut(index) {
            *weight += self.alpha;
        }
        Ok(histogram)
    }

    fn output(&self, state: &Histogram) -> Histogram {
        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecurrenceIterable, testing::random_sequence};
    use assert_approx_eq::assert_approx_eq;

    fn unit_grid() -> Result<BinGrid> {
        BinGrid::new(0.0, 10.0, 1)
    }

    #[test]
    fn grid_enumerates_labels() -> Result<()> {
        let grid = unit_grid()?;
        assert_eq!(grid.len(), 101);
        assert!(!grid.is_empty());
        assert_eq!(grid.labels().next(), Some(0.0));
        assert_eq!(grid.labels().last(), Some(10.0));
        assert_approx_eq!(grid.label(37), 3.7);
        Ok(())
    }

    #[test]
    fn grid_rounds_and_clamps() -> Result<()> {
        let grid = unit_grid()?;
        assert_eq!(grid.index_of(3.74), Some(37));
        assert_eq!(grid.index_of(3.76), Some(38));
        assert_eq!(grid.index_of(-4.0), Some(0));
        assert_eq!(grid.index_of(12.3), Some(100));
        assert_eq!(grid.index_of(Real::INFINITY), Some(100));
        assert_eq!(grid.index_of(Real::NAN), None);
        Ok(())
    }

    #[test]
    fn grid_rejects_bad_bounds() {
        assert!(BinGrid::new(1.0, 1.0, 1).is_err());
        assert!(BinGrid::new(2.0, 1.0, 1).is_err());
        assert!(BinGrid::new(Real::NEG_INFINITY, 1.0, 1).is_err());
        assert!(BinGrid::new(0.0, 1.0, MAX_PRECISION + 1).is_err());
        assert!(BinGrid::new(0.0, 1e9, 6).is_err());
        assert!(BinGrid::new(0.01, 0.09, 1).is_err());
    }

    #[test]
    fn seed_concentrates_unit_mass() -> Result<()> {
        let histogram = [4.2]
            .into_iter()
            .recur(RunningHistogram::new(0.1, unit_grid()?)?)
            .next()
            .transpose()?;
        let histogram = histogram.ok_or(RecurrenceError::EmptyInput)?;
        assert_eq!(histogram.weight_of(4.2), Some(1.0));
        assert_eq!(histogram.total(), 1.0);
        assert_approx_eq!(histogram.mode(), 4.2);
        Ok(())
    }

    #[test]
    fn decays_then_adds() -> Result<()> {
        let histogram = [1.0, 2.0]
            .into_iter()
            .recur(RunningHistogram::new(0.25, unit_grid()?)?)
            .last()
            .transpose()?
            .ok_or(RecurrenceError::EmptyInput)?;
        assert_eq!(histogram.weight_of(1.0), Some(0.75));
        assert_eq!(histogram.weight_of(2.0), Some(0.25));
        assert_eq!(
            histogram.iter().filter(|&(_, weight)| weight > 0.0).count(),
            2
        );
        Ok(())
    }

    #[test]
    fn mass_is_preserved() -> Result<()> {
        let data = random_sequence(5, 1000)
            .into_iter()
            .map(|x| x + 5.0)
            .collect::<Vec<_>>();
        for histogram in data
            .into_iter()
            .recur(RunningHistogram::new(0.05, unit_grid()?)?)
        {
            assert_approx_eq!(histogram?.total(), 1.0, 1e-9);
        }
        Ok(())
    }

    #[test]
    fn nan_input_is_an_arithmetic_error() -> Result<()> {
        let results = [1.0, Real::NAN, 2.0]
            .into_iter()
            .recur(RunningHistogram::new(0.5, unit_grid()?)?)
            .collect::<Vec<_>>();
        assert_eq!(results.len(), 2);
        assert!(matches!(
            results.last(),
            Some(Err(RecurrenceError::Arithmetic { step: 2, .. }))
        ));
        Ok(())
    }

    #[test]
    fn overflowing_bound_is_named() {
        assert!(matches!(
            BinGrid::new(-1e12, 0.0, 6),
            Err(RecurrenceError::InvalidParameter { name: "lo", .. })
        ));
        assert!(matches!(
            BinGrid::new(0.0, 1e12, 6),
            Err(RecurrenceError::InvalidParameter { name: "hi", .. })
        ));
    }

    #[test]
    fn explicit_initial_states() -> Result<()> {
        let rule = RunningHistogram::new(0.5, unit_grid()?)?;
        assert_eq!(rule.empty().total(), 0.0);
        assert_approx_eq!(rule.uniform().total(), 1.0, 1e-12);

        let from_empty = [5.0, 5.0]
            .into_iter()
            .recur_from(rule.clone(), rule.empty())
            .collect::<Result<Vec<_>>>()?;
        let weights = from_empty
            .iter()
            .map(|histogram| histogram.weight_of(5.0))
            .collect::<Vec<_>>();
        assert_eq!(weights, vec![Some(0.5), Some(0.75)]);

        let from_uniform = [5.0]
            .into_iter()
            .recur_from(rule.clone(), rule.uniform())
            .last()
            .transpose()?
            .ok_or(RecurrenceError::EmptyInput)?;
        assert_approx_eq!(from_uniform.total(), 1.0, 1e-12);
        assert_approx_eq!(from_uniform.weight_of(5.0).unwrap_or_default(), 0.5 + 0.5 / 101.0);
        Ok(())
    }

    #[test]
    fn state_on_a_different_grid_is_rejected() -> Result<()> {
        let narrow = RunningHistogram::new(0.5, BinGrid::new(0.0, 1.0, 1)?)?;
        let wide = RunningHistogram::new(0.5, unit_grid()?)?;
        let results = [5.0, 6.0]
            .into_iter()
            .recur_from(wide, narrow.uniform())
            .collect::<Vec<_>>();
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results.first(),
            Some(Err(RecurrenceError::Arithmetic { step: 1, .. }))
        ));

        // An equal grid built separately is accepted.
        let twin = RunningHistogram::new(0.5, unit_grid()?)?;
        let total = [5.0]
            .into_iter()
            .recur_from(twin, RunningHistogram::new(0.1, unit_grid()?)?.empty())
            .last()
            .transpose()?
            .map(|histogram| histogram.total());
        assert_eq!(total, Some(0.5));
        Ok(())
    }

    #[test]
    fn rejects_alpha_out_of_range() -> Result<()> {
        assert!(RunningHistogram::new(1.5, unit_grid()?).is_err());
        assert!(RunningHistogram::new(Real::NAN, unit_grid()?).is_err());
        Ok(())
    }
}
