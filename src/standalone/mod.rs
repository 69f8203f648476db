//! The single-process MapReduce driver.
//!
//! A run walks through the stages
//! `Idle -> Tokenized -> Mapped -> Grouped -> Reduced` and stops at the first
//! error. There is no partial result: either the complete frequency map is
//! returned or an error is.

use std::fmt;

use tracing::{debug, info, info_span, warn};

use crate::normalize::normalize;
use crate::*;

pub mod engine;
pub mod pool;

use engine::{filter_tokens, perform_map, perform_reduce, shuffle};
use pool::WorkerPool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Tokenized,
    Mapped,
    Grouped,
    Reduced,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Tokenized => "tokenized",
            Stage::Mapped => "mapped",
            Stage::Grouped => "grouped",
            Stage::Reduced => "reduced",
        };
        f.write_str(name)
    }
}

/// Owns the worker pool and runs word-frequency jobs on it.
///
/// The pool is built once and reused by both phases of every run.
pub struct MapReduce {
    pool: WorkerPool,
    engine: Workload,
    config: PipelineConfig,
}

impl MapReduce {
    /// Builds a driver for the workload named in `config`.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let engine = workload::named(&config.workload)?;
        Self::with_workload(config, engine)
    }

    /// Builds a driver for a caller-supplied workload.
    pub fn with_workload(config: PipelineConfig, engine: Workload) -> Result<Self> {
        config.validate()?;
        let pool = WorkerPool::new(config.worker_count())?;
        Ok(Self {
            pool,
            engine,
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Counts the words of `text`, optionally restricted to `allow`.
    ///
    /// A text without words yields an empty map, or [`Error::EmptyInput`]
    /// when `fail_on_empty` is set.
    pub fn run(&self, text: &str, allow: Option<&AllowSet>) -> Result<WordFrequencies> {
        let span = info_span!("mapreduce", workers = self.pool.workers(), bytes = text.len());
        let _guard = span.enter();

        let mut stage = Stage::Idle;
        let result = self.execute(text, allow, &mut stage);
        match &result {
            Ok(freq) => info!(distinct = freq.len(), "run complete"),
            Err(err) => warn!(%stage, error = %err, "run aborted"),
        }
        result
    }

    fn execute(
        &self,
        text: &str,
        allow: Option<&AllowSet>,
        stage: &mut Stage,
    ) -> Result<WordFrequencies> {
        let tokens = normalize(text);
        let tokens = filter_tokens(tokens, allow);
        advance(stage, Stage::Tokenized, tokens.len());

        if tokens.is_empty() {
            if self.config.fail_on_empty {
                return Err(Error::EmptyInput);
            }
            warn!("input contains no words");
            advance(stage, Stage::Reduced, 0);
            return Ok(WordFrequencies::new());
        }

        let mapped = perform_map(&self.pool, &self.engine, tokens, self.config.batch_size)?;
        advance(stage, Stage::Mapped, mapped.len());

        let groups = shuffle(mapped);
        advance(stage, Stage::Grouped, groups.len());

        let freq = perform_reduce(&self.pool, &self.engine, groups, self.config.bucket_count())?;
        advance(stage, Stage::Reduced, freq.len());

        Ok(freq)
    }
}

fn advance(stage: &mut Stage, next: Stage, items: usize) {
    debug!(from = %stage, to = %next, items, "stage complete");
    *stage = next;
}
