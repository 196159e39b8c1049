use crate::{Recurrence, RecurrenceError, Step};
use std::iter::FusedIterator;
use tracing::{debug, trace};

/// Iterator which applies a recurrence rule to another iterator.
///
/// Yields one hidden state per input. If the source is empty a single
/// [RecurrenceError::EmptyInput] is yielded. After any error the iterator is exhausted,
/// but states yielded before the error remain valid.
pub struct RecurrenceIter<I, R>
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
    /// Rule to apply.
    rule: R,
    /// Source.
    source: I,
    /// The live hidden state, [None] until the first input is seeded.
    state: Option<R::State>,
    /// Index of the most recently consumed input.
    step: Step,
    finished: bool,
}

impl<I, R> RecurrenceIter<I, R>
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
    /// Creates a new iterator which seeds the hidden state from the first input.
    ///
    /// # Parameters
    /// - source: base iterator which is consumed.
    /// - rule: recurrence to apply to the base iterator.
    pub fn new(source: I, rule: R) -> Self {
        Self {
            rule,
            source,
            state: None,
            step: 0,
            finished: false,
        }
    }

    /// Creates a new iterator which folds the first input into `initial`, rather than seeding.
    ///
    /// # Parameters
    /// - source: base iterator which is consumed.
    /// - rule: recurrence to apply to the base iterator.
    /// - initial: the hidden state before any input has arrived.
    pub fn with_initial_state(source: I, rule: R, initial: R::State) -> Self {
        Self {
            state: Some(initial),
            ..Self::new(source, rule)
        }
    }

    /// Index of the most recently consumed input, counting from one.
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }
}

impl<I, R> Iterator for RecurrenceIter<I, R>
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
    type Item = Result<R::Output, RecurrenceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some(input) = self.source.next() else {
            self.finished = true;
            if self.step == 0 {
                debug!("Input sequence is empty");
                return Some(Err(RecurrenceError::EmptyInput));
            }
            return None;
        };
        self.step += 1;

        let next = match self.state.take() {
            Some(previous) => self.rule.combine(previous, input, self.step),
            None => self.rule.seed(input),
        };
        match next {
            Ok(state) => {
                let output = self.rule.output(&state);
                self.state = Some(state);
                trace!(step = self.step, "Hidden state updated");
                Some(Ok(output))
            }
            Err(e) => {
                debug!(step = self.step, "Recurrence halted: {e}");
                self.finished = true;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.finished {
            return (0, Some(0));
        }
        let (lower, upper) = self.source.size_hint();
        if self.step == 0 {
            // An empty source still yields its error.
            (1, upper.map(|upper| upper.max(1)))
        } else {
            // An error may end the sequence after one more item.
            (lower.min(1), upper)
        }
    }
}

impl<I, R> FusedIterator for RecurrenceIter<I, R>
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
}

/// Provides method for creating a recurrence iterator from another iterator.
pub trait RecurrenceIterable<I, R>
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
    /// Creates an iterator which applies a recurrence to the iterator.
    fn recur(self, rule: R) -> RecurrenceIter<I, R>;

    /// Creates an iterator which applies a recurrence to the iterator, starting from an explicit hidden state.
    fn recur_from(self, rule: R, initial: R::State) -> RecurrenceIter<I, R>;
}

impl<I, R> RecurrenceIterable<I, R> for I
where
    I: Iterator<Item = R::Input>,
    R: Recurrence,
{
    fn recur(self, rule: R) -> RecurrenceIter<I, R> {
        RecurrenceIter::new(self, rule)
    }

    fn recur_from(self, rule: R, initial: R::State) -> RecurrenceIter<I, R> {
        RecurrenceIter::with_initial_state(self, rule, initial)
    }
}
