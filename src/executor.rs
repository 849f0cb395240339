//! Batch evaluation of match rows.
//!
//! Rows are independent, so a batch is split across rayon workers and each
//! result is written to the slot of the row that produced it. Output order
//! therefore always equals input order, whatever the scheduling.
//!
//! A batch can be stopped early through a [`CancelFlag`] or a deadline
//! (`timeout_ms`). Either one fails the whole batch; no partial column is
//! returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use matcher::{MatchConfig, MatchRow, match_row};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{Level, debug, info, warn};

use crate::error::PipelineError;
use crate::metrics::metrics_recorder;

/// Scheduling knobs for [`BatchExecutor`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Configuration schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Spread rows across worker threads. Ignored without the `parallel`
    /// feature.
    #[serde(default = "default_use_parallel")]
    pub use_parallel: bool,
    /// Size of a dedicated worker pool. `None` uses rayon's global pool.
    #[serde(default)]
    pub num_threads: Option<usize>,
    /// Smallest number of rows a worker takes at once.
    #[serde(default = "default_min_rows_per_task")]
    pub min_rows_per_task: usize,
    /// Wall-clock budget for one batch, measured from the start of the call.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_version() -> u32 {
    1
}

fn default_use_parallel() -> bool {
    true
}

fn default_min_rows_per_task() -> usize {
    16
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            use_parallel: default_use_parallel(),
            num_threads: None,
            min_rows_per_task: default_min_rows_per_task(),
            timeout_ms: None,
        }
    }
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_num_threads(mut self, num_threads: Option<usize>) -> Self {
        self.num_threads = num_threads;
        self
    }

    pub fn with_min_rows_per_task(mut self, rows: usize) -> Self {
        self.min_rows_per_task = rows;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.version < 1 {
            return Err(PipelineError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if self.num_threads == Some(0) {
            return Err(PipelineError::InvalidConfig(
                "num_threads must be greater than zero".into(),
            ));
        }
        if self.min_rows_per_task == 0 {
            return Err(PipelineError::InvalidConfig(
                "min_rows_per_task must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Shared stop signal for in-flight batches.
///
/// Clones observe the same flag, so one handle can be given to the batch and
/// another kept by whoever decides to stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy)]
enum Interrupt {
    Cancelled,
    Deadline,
}

/// Checked before every row.
struct StopCheck<'a> {
    cancel: Option<&'a CancelFlag>,
    deadline: Option<Instant>,
}

impl StopCheck<'_> {
    #[inline]
    fn check(&self) -> Result<(), Interrupt> {
        if self.cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(Interrupt::Cancelled);
        }
        if self.deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(Interrupt::Deadline);
        }
        Ok(())
    }
}

/// Evaluates batches of [`MatchRow`]s under one matching policy.
///
/// ```
/// use trackmatch::{BatchExecutor, ExecutorConfig, MatchConfig, MatchRow, TrackPoint};
///
/// let a = [TrackPoint::new(0.0, 0.0, 0.0)];
/// let b = [TrackPoint::new(3.0, 4.0, 0.0)];
/// let rows = vec![MatchRow::new((1, &a), (2, &b), 0.0, 0.0)];
///
/// let executor = BatchExecutor::new(MatchConfig::default(), ExecutorConfig::default())?;
/// assert_eq!(executor.match_pairs(&rows)?, vec![Some(5.0)]);
/// # Ok::<(), trackmatch::PipelineError>(())
/// ```
#[derive(Debug)]
pub struct BatchExecutor {
    matcher: MatchConfig,
    config: ExecutorConfig,
    #[cfg(feature = "parallel")]
    pool: Option<rayon::ThreadPool>,
}

impl BatchExecutor {
    /// Validate both configs and, if `num_threads` is set, start a dedicated
    /// worker pool.
    pub fn new(matcher: MatchConfig, config: ExecutorConfig) -> Result<Self, PipelineError> {
        matcher.validate()?;
        config.validate()?;

        #[cfg(feature = "parallel")]
        let pool = match config.num_threads {
            Some(threads) if config.use_parallel => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .thread_name(|i| format!("trackmatch-worker-{i}"))
                    .build()
                    .map_err(|err| PipelineError::ThreadPool(err.to_string()))?,
            ),
            _ => None,
        };

        Ok(Self {
            matcher,
            config,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.matcher
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// One distance per row, in row order. `None` marks an unmatched row.
    pub fn match_pairs(&self, rows: &[MatchRow<'_>]) -> Result<Vec<Option<f64>>, PipelineError> {
        self.run(rows, None)
    }

    /// Like [`match_pairs`](Self::match_pairs), but stops with
    /// [`PipelineError::Cancelled`] once `cancel` is raised.
    pub fn match_pairs_cancellable(
        &self,
        rows: &[MatchRow<'_>],
        cancel: &CancelFlag,
    ) -> Result<Vec<Option<f64>>, PipelineError> {
        self.run(rows, Some(cancel))
    }

    fn run(
        &self,
        rows: &[MatchRow<'_>],
        cancel: Option<&CancelFlag>,
    ) -> Result<Vec<Option<f64>>, PipelineError> {
        let start = Instant::now();
        let stop = StopCheck {
            cancel,
            deadline: self
                .config
                .timeout_ms
                .map(|ms| start + Duration::from_millis(ms)),
        };

        let parallel = self.runs_parallel(rows.len());
        let span = tracing::span!(
            Level::INFO,
            "executor.match_pairs",
            rows = rows.len(),
            parallel
        );
        let _guard = span.enter();

        let outcome = if parallel {
            self.evaluate_parallel(rows, &stop)
        } else {
            self.evaluate_sequential(rows, &stop)
        };
        let elapsed = start.elapsed();
        let recorder = metrics_recorder();

        match outcome {
            Ok(distances) => {
                let unmatched = distances.iter().filter(|d| d.is_none()).count();
                info!(
                    rows = rows.len(),
                    unmatched,
                    elapsed_micros = elapsed.as_micros(),
                    "match_batch_success"
                );
                if let Some(recorder) = recorder {
                    recorder.record_batch(elapsed, rows.len(), unmatched);
                }
                Ok(distances)
            }
            Err(interrupt) => {
                let err = match interrupt {
                    Interrupt::Cancelled => PipelineError::Cancelled,
                    Interrupt::Deadline => PipelineError::DeadlineExceeded {
                        timeout_ms: self.config.timeout_ms.unwrap_or_default(),
                    },
                };
                warn!(
                    error = %err,
                    rows = rows.len(),
                    elapsed_micros = elapsed.as_micros(),
                    "match_batch_interrupted"
                );
                if let Some(recorder) = recorder {
                    recorder.record_interrupt(elapsed, rows.len());
                }
                Err(err)
            }
        }
    }

    #[inline]
    fn evaluate_row(&self, row: &MatchRow<'_>, stop: &StopCheck<'_>) -> Result<Option<f64>, Interrupt> {
        stop.check()?;
        Ok(match_row(row, &self.matcher))
    }

    fn evaluate_sequential(
        &self,
        rows: &[MatchRow<'_>],
        stop: &StopCheck<'_>,
    ) -> Result<Vec<Option<f64>>, Interrupt> {
        rows.iter().map(|row| self.evaluate_row(row, stop)).collect()
    }

    #[cfg(feature = "parallel")]
    fn runs_parallel(&self, rows: usize) -> bool {
        self.config.use_parallel && rows > 1
    }

    #[cfg(not(feature = "parallel"))]
    fn runs_parallel(&self, _rows: usize) -> bool {
        false
    }

    #[cfg(feature = "parallel")]
    fn evaluate_parallel(
        &self,
        rows: &[MatchRow<'_>],
        stop: &StopCheck<'_>,
    ) -> Result<Vec<Option<f64>>, Interrupt> {
        let mut slots = Vec::with_capacity(rows.len());
        let mut job = || {
            rows.par_iter()
                .with_min_len(self.config.min_rows_per_task)
                .map(|row| self.evaluate_row(row, stop))
                .collect_into_vec(&mut slots)
        };
        match &self.pool {
            Some(pool) => {
                debug!(threads = pool.current_num_threads(), "dedicated_pool");
                pool.install(job)
            }
            None => job(),
        }
        slots.into_iter().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate_parallel(
        &self,
        rows: &[MatchRow<'_>],
        stop: &StopCheck<'_>,
    ) -> Result<Vec<Option<f64>>, Interrupt> {
        self.evaluate_sequential(rows, stop)
    }
}
