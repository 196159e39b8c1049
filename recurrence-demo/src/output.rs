//! Formats the hidden states as rows, and writes them as CSV or JSON lines.
use crate::{parameters::OutputFormat, signal::Sample};
use recurrence::{Histogram, Real, Stats, Step};
use serde::Serialize;
use std::{
    fmt::{Display, Formatter},
    io::Write,
};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub(crate) enum OutputError {
    #[error("Cannot write to output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot serialise row: {0}")]
    Json(#[from] serde_json::Error),
}

/// The consumer facing value of one hidden state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub(crate) enum State {
    Scalar(Real),
    Count(usize),
    Stats { mean: Real, variance: Real },
    Histogram { mode: Real, weights: Vec<Real> },
}

impl From<Real> for State {
    fn from(value: Real) -> Self {
        Self::Scalar(value)
    }
}

impl From<usize> for State {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<Stats<Real>> for State {
    fn from(stats: Stats<Real>) -> Self {
        Self::Stats {
            mean: stats.mean,
            variance: stats.variance,
        }
    }
}

impl From<Histogram> for State {
    fn from(histogram: Histogram) -> Self {
        Self::Histogram {
            mode: histogram.mode(),
            weights: histogram.weights().to_vec(),
        }
    }
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(value) => write!(f, "{value}"),
            Self::Count(count) => write!(f, "{count}"),
            Self::Stats { mean, variance } => write!(f, "{mean},{variance}"),
            Self::Histogram { mode, weights } => {
                write!(f, "{mode}")?;
                for weight in weights {
                    write!(f, ",{weight}")?;
                }
                Ok(())
            }
        }
    }
}

/// One step of the evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Row {
    pub(crate) index: Step,
    pub(crate) time: Real,
    pub(crate) input: Real,
    pub(crate) state: State,
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{},{}", self.index, self.time, self.input, self.state)
    }
}

/// The rows of an evaluation, with the names of the state columns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Table {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Row>,
}

impl Table {
    /// Pairs each sample with the hidden state computed at its step.
    ///
    /// If there are fewer states than samples, the trailing samples are dropped.
    pub(crate) fn new<S, I>(columns: Vec<String>, samples: &[Sample], states: I) -> Self
    where
        S: Into<State>,
        I: IntoIterator<Item = S>,
    {
        let rows = samples
            .iter()
            .zip(states)
            .enumerate()
            .map(|(i, (sample, state))| Row {
                index: i + 1,
                time: sample.time,
                input: sample.value,
                state: state.into(),
            })
            .collect();
        Self { columns, rows }
    }

    fn header(&self) -> String {
        ["index", "time", "input"]
            .into_iter()
            .map(str::to_owned)
            .chain(self.columns.iter().cloned())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Writes the table to `writer` in the requested format.
    #[instrument(skip_all, level = "debug", fields(num_rows = self.rows.len()), err(level = "warn"))]
    pub(crate) fn write<W: Write>(&self, format: OutputFormat, writer: &mut W) -> Result<(), OutputError> {
        match format {
            OutputFormat::Csv => {
                writeln!(writer, "{}", self.header())?;
                for row in &self.rows {
                    writeln!(writer, "{row}")?;
                }
            }
            OutputFormat::Json => {
                for row in &self.rows {
                    serde_json::to_writer(&mut *writer, row)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        debug!("Table written");
        Ok(())
    }
}
