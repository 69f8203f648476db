//! Pipeline tuning knobs.
//!
//! A config can be loaded from a JSON file; every field is optional and
//! falls back to its default.
//!
//! ```json
//! { "workers": 8, "batch_size": 2048, "fail_on_empty": true }
//! ```

use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const DEFAULT_BATCH_SIZE: usize = 4096;
const BUCKETS_PER_WORKER: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Size of the worker pool. `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
    /// Number of tokens handed to a single map task.
    pub batch_size: usize,
    /// Number of reduce tasks. `None` uses four per worker.
    pub reduce_buckets: Option<usize>,
    /// Treat a text without words as an error instead of an empty result.
    pub fail_on_empty: bool,
    /// Name of the workload to run, see [`crate::workload::named`].
    pub workload: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            batch_size: DEFAULT_BATCH_SIZE,
            reduce_buckets: None,
            fail_on_empty: false,
            workload: "wc".to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(Error::InvalidArgument("workers must be positive".into()));
        }
        if self.batch_size == 0 {
            return Err(Error::InvalidArgument("batch_size must be positive".into()));
        }
        if self.reduce_buckets == Some(0) {
            return Err(Error::InvalidArgument("reduce_buckets must be positive".into()));
        }
        Ok(())
    }

    /// Resolved pool size.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1)
        })
    }

    /// Resolved number of reduce tasks.
    pub fn bucket_count(&self) -> usize {
        self.reduce_buckets
            .unwrap_or_else(|| self.worker_count() * BUCKETS_PER_WORKER)
    }
}
