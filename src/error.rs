use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// The phase of a run a worker task belonged to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Map,
    Reduce,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Map => f.write_str("map"),
            Phase::Reduce => f.write_str("reduce"),
        }
    }
}

/// A single task that failed inside a parallel phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFailure {
    /// Index of the task within its phase.
    pub task: usize,
    pub message: String,
}

impl fmt::Display for TaskFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task {}: {}", self.task, self.message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    /// No tokens were left after tokenization and filtering.
    #[error("input contains no words")]
    EmptyInput,

    #[error(
        "{} of {} {} task(s) failed; first: {}",
        .failures.len(),
        .tasks,
        .phase,
        first_failure(.failures)
    )]
    WorkerTaskFailure {
        phase: Phase,
        tasks: usize,
        failures: Vec<TaskFailure>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to fetch text: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("GET {url} returned {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid input pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("no input files match `{0}`")]
    NoInput(String),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

fn first_failure(failures: &[TaskFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<none>".to_string())
}

pub type Result<T> = std::result::Result<T, Error>;
