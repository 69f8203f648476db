//! A fixed-size worker pool shared by the map and reduce phases.
//!
//! Each phase is a pure fan-out/fan-in. Every input becomes one task that
//! owns it; outputs are gathered in task order once the whole phase is done. A failing (or
//! panicking) task flips a cancellation flag so siblings that have not
//! started yet are skipped; all failures are reported together.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use crate::error::{Phase, TaskFailure};
use crate::{Error, Result};

enum Outcome<O> {
    Done(O),
    Failed(TaskFailure),
    Skipped,
}

pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(Error::InvalidArgument("worker pool needs at least one thread".into()));
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("wordfreq-worker-{i}"))
            .build()?;
        debug!(workers, "worker pool started");
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `task` once per input on the pool and returns the outputs in
    /// input order.
    ///
    /// Fails with [`Error::WorkerTaskFailure`] if any task returns an error
    /// or panics.
    pub fn run_tasks<I, O, F>(&self, phase: Phase, inputs: Vec<I>, task: F) -> Result<Vec<O>>
    where
        I: Send,
        O: Send,
        F: Fn(I) -> anyhow::Result<O> + Sync,
    {
        let tasks = inputs.len();
        let cancelled = AtomicBool::new(false);

        let outcomes: Vec<Outcome<O>> = self.pool.install(|| {
            inputs
                .into_par_iter()
                .enumerate()
                .map(|(idx, input)| {
                    if cancelled.load(Ordering::Acquire) {
                        return Outcome::Skipped;
                    }
                    trace!(%phase, task = idx, "task started");
                    let message = match panic::catch_unwind(AssertUnwindSafe(|| task(input))) {
                        Ok(Ok(output)) => return Outcome::Done(output),
                        Ok(Err(err)) => format!("{err:#}"),
                        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
                    };
                    cancelled.store(true, Ordering::Release);
                    Outcome::Failed(TaskFailure { task: idx, message })
                })
                .collect()
        });

        let mut outputs = Vec::with_capacity(tasks);
        let mut failures = Vec::new();
        let mut skipped = 0usize;
        for outcome in outcomes {
            match outcome {
                Outcome::Done(output) => outputs.push(output),
                Outcome::Failed(failure) => failures.push(failure),
                Outcome::Skipped => skipped += 1,
            }
        }

        if !failures.is_empty() {
            debug!(%phase, tasks, failed = failures.len(), skipped, "phase aborted");
            return Err(Error::WorkerTaskFailure {
                phase,
                tasks,
                failures,
            });
        }
        Ok(outputs)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
