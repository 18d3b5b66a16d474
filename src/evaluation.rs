//! Objective evaluation: scoring whole batches of candidates.
//!
//! The engine hands every generation's fresh rows to a
//! [`FitnessEvaluator`] in one call, which is the natural seam for
//! per-call timeouts and data parallelism. [`Objective`] wraps a plain
//! `fn(&[f64]) -> f64` for serial evaluation; `ParallelObjective`
//! (behind the `parallel` feature) fans the rows out across a rayon
//! pool.

use crate::error::GaError;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scores a batch of candidate rows: one fitness per row, lower is
/// better.
///
/// Implementations may evaluate rows in any order but must return the
/// scores in row order. Returning `f64::INFINITY` is the conventional
/// way to reject an infeasible candidate; `NaN` aborts the run.
pub trait FitnessEvaluator: Send + Sync {
    fn evaluate_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, GaError>;
}

/// Serial evaluator around a plain objective function.
///
/// With [`with_timeout`](Objective::with_timeout) each call runs on a
/// fresh worker thread and is abandoned once the limit passes, so a hung
/// objective cannot stall the run. Reserve the timeout for objectives
/// that can genuinely hang; the per-call thread is not free.
///
/// # Examples
///
/// ```
/// use gabox::Objective;
/// use std::time::Duration;
///
/// let plain = Objective::new(|genes: &[f64]| genes.iter().sum());
/// let guarded = Objective::new(|genes: &[f64]| genes.iter().sum())
///     .with_timeout(Duration::from_secs(10));
/// # let _ = (plain, guarded);
/// ```
pub struct Objective<F> {
    function: Arc<F>,
    timeout: Option<Duration>,
}

impl<F> Objective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
{
    pub fn new(function: F) -> Self {
        Self {
            function: Arc::new(function),
            timeout: None,
        }
    }

    /// Limits each objective call to `timeout` wall-clock time.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn call_with_timeout(&self, row: &[f64], limit: Duration) -> Result<f64, GaError> {
        let (tx, rx) = mpsc::channel();
        let function = Arc::clone(&self.function);
        let genes = row.to_vec();
        thread::spawn(move || {
            let _ = tx.send(function(&genes));
        });
        match rx.recv_timeout(limit) {
            Ok(score) => Ok(score),
            Err(RecvTimeoutError::Timeout) => Err(GaError::Timeout { limit }),
            Err(RecvTimeoutError::Disconnected) => Err(GaError::InvalidResult {
                message: "objective panicked during evaluation".into(),
            }),
        }
    }
}

impl<F> FitnessEvaluator for Objective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
{
    fn evaluate_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, GaError> {
        match self.timeout {
            None => Ok(rows.iter().map(|row| (self.function)(row)).collect()),
            Some(limit) => rows
                .iter()
                .map(|row| self.call_with_timeout(row, limit))
                .collect(),
        }
    }
}

/// Rayon-backed evaluator: scores the rows of each batch in parallel.
///
/// Worth it when a single objective call is expensive relative to the
/// fork/join overhead. There is no per-call timeout here; use
/// [`Objective::with_timeout`] when the objective can hang.
#[cfg(feature = "parallel")]
pub struct ParallelObjective<F> {
    function: F,
}

#[cfg(feature = "parallel")]
impl<F> ParallelObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

#[cfg(feature = "parallel")]
impl<F> FitnessEvaluator for ParallelObjective<F>
where
    F: Fn(&[f64]) -> f64 + Send + Sync,
{
    fn evaluate_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, GaError> {
        Ok(rows.par_iter().map(|row| (self.function)(row)).collect())
    }
}
