//! Composes two rules into a deeper system.
use super::Recurrence;
use crate::{Result, Step};

/// A rule whose hidden states are fed, step by step, into a second rule.
///
/// The composite is itself a [Recurrence], so stacks of any depth can be built
/// by calling [Recurrence::stack] repeatedly.
#[derive(Debug, Clone)]
pub struct Stacked<A, B> {
    lower: A,
    upper: B,
}

impl<A, B> Stacked<A, B>
where
    A: Recurrence,
    B: Recurrence<Input = A::Output>,
{
    pub fn new(lower: A, upper: B) -> Self {
        Self { lower, upper }
    }

    /// The rule applied to the raw input.
    pub fn lower(&self) -> &A {
        &self.lower
    }

    /// The rule applied to the outputs of [Self::lower].
    pub fn upper(&self) -> &B {
        &self.upper
    }
}

impl<A, B> Recurrence for Stacked<A, B>
where
    A: Recurrence,
    B: Recurrence<Input = A::Output>,
{
    type Input = A::Input;
    type State = (A::State, B::State);
    type Output = B::Output;

    fn seed(&self, first: A::Input) -> Result<Self::State> {
        let lower = self.lower.seed(first)?;
        let upper = self.upper.seed(self.lower.output(&lower))?;
        Ok((lower, upper))
    }

    fn combine(&self, (lower, upper): Self::State, input: A::Input, step: Step) -> Result<Self::State> {
        let lower = self.lower.combine(lower, input, step)?;
        let upper = self.upper.combine(upper, self.lower.output(&lower), step)?;
        Ok((lower, upper))
    }

    fn output(&self, (_, upper): &Self::State) -> B::Output {
        self.upper.output(upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ExponentialAverage, RecurrenceIterable, RunningMax, RunningMean, RunningSum,
        RunningVariance, ZeroCrossings, evaluate, testing::random_sequence,
    };

    #[test]
    fn stacking_equals_two_passes() -> Result<()> {
        for seed in 0..4 {
            let data = random_sequence(seed, 200);
            let first = ExponentialAverage::new(0.8)?;
            let second = RunningMax::new();

            let stacked = evaluate(data.iter().copied(), first.stack(second))?;
            let hidden = evaluate(data.iter().copied(), first)?;
            let manual = evaluate(hidden, second)?;
            assert_eq!(stacked, manual);
        }
        Ok(())
    }

    #[test]
    fn three_deep_stack() -> Result<()> {
        let data = random_sequence(7, 100);
        let average = ExponentialAverage::new(0.5)?;

        let stacked = evaluate(
            data.iter().copied(),
            average.stack(average).stack(average),
        )?;
        let once = evaluate(data.iter().copied(), average)?;
        let twice = evaluate(once, average)?;
        let thrice = evaluate(twice, average)?;
        assert_eq!(stacked, thrice);
        Ok(())
    }

    #[test]
    fn stacks_across_state_types() -> Result<()> {
        // Running total of the crossing count, then the mean of the running sum.
        let data = [1.0, -1.0, 1.0, 1.0];
        let crossings_then_sum = ZeroCrossings::new().stack(crate::from_fn(
            |count: usize| Ok(count),
            |total: usize, count: usize, _step| Ok(total + count),
        ));
        let totals = evaluate(data, crossings_then_sum)?;
        assert_eq!(totals, vec![0, 1, 3, 5]);

        let variance_of_sums = data
            .into_iter()
            .recur(RunningSum::new().stack(RunningVariance::new()))
            .map(|stats| stats.map(|stats| stats.mean))
            .collect::<Result<Vec<_>>>()?;
        let mean_of_sums = evaluate(data, RunningSum::new().stack(RunningMean::new()))?;
        assert_eq!(variance_of_sums, mean_of_sums);
        Ok(())
    }
}
