//! Errors raised while constructing or evaluating a [Recurrence](crate::Recurrence).
use crate::Step;
use thiserror::Error;

/// Boxed error returned by a user supplied combination function.
pub type CombinationError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum RecurrenceError {
    /// The input sequence had no elements, so there is no first input to derive a state from.
    #[error("Input sequence is empty, no initial state can be derived")]
    EmptyInput,

    /// A rule was constructed with a parameter outside its valid domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// The update could not be computed at the given step.
    #[error("Arithmetic error at step {step}: {reason}")]
    Arithmetic { step: Step, reason: &'static str },

    /// Raised by a closure based rule, carried through unchanged.
    #[error("Combination function failed: {0}")]
    Combination(CombinationError),
}

impl RecurrenceError {
    pub(crate) fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// Result type alias for recurrence operations.
pub type Result<T> = std::result::Result<T, RecurrenceError>;
