use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser, ValueEnum};

use crate::{AllowSet, PipelineConfig, Result};

pub const DEFAULT_URL: &str = "https://gutenberg.net.au/ebooks01/0100021.txt";

#[derive(Parser, Debug)]
#[command(version, about = "Word frequency analysis with MapReduce", long_about = None)]
#[command(group(ArgGroup::new("source").args(["url", "input", "stdin"])))]
pub struct Args {
    /// Fetch the text from this URL [default: a Project Gutenberg book]
    #[arg(short, long)]
    pub url: Option<String>,

    /// Glob spec for local input files
    #[arg(short, long)]
    pub input: Option<String>,

    /// Read the text from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Only count these words (comma separated, repeatable)
    #[arg(short, long, value_delimiter = ',')]
    pub words: Vec<String>,

    /// Number of top words to show
    #[arg(short = 'n', long, default_value_t = 15, value_parser = clap::value_parser!(u64).range(1..))]
    pub top: u64,

    /// Print every word instead of the top N
    #[arg(long)]
    pub all: bool,

    /// Worker pool size [default: available parallelism]
    #[arg(long)]
    pub workers: Option<usize>,

    /// Tokens per map task
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// JSON pipeline config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Give up on the download after this many seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Fail when the text contains no words
    #[arg(long)]
    pub fail_on_empty: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

/// Where the text of a job comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(String),
    Files(String),
    Stdin,
}

/// A fully resolved run of the binary.
#[derive(Debug, Clone)]
pub struct Job {
    pub source: Source,
    pub allow: Option<AllowSet>,
    pub top: usize,
    pub all: bool,
    pub format: Format,
    pub timeout: Duration,
    pub config: PipelineConfig,
}

impl Args {
    /// Merges the config file (if any) with the flags; flags win.
    pub fn into_job(self) -> Result<Job> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path)?,
            None => PipelineConfig::default(),
        };
        if self.workers.is_some() {
            config.workers = self.workers;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        config.fail_on_empty |= self.fail_on_empty;
        config.validate()?;

        let source = match (self.url, self.input, self.stdin) {
            (_, Some(pattern), _) => Source::Files(pattern),
            (_, None, true) => Source::Stdin,
            (url, None, false) => Source::Url(url.unwrap_or_else(|| DEFAULT_URL.to_string())),
        };

        let allow = self
            .words
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty())
            .collect::<AllowSet>();

        Ok(Job {
            source,
            allow: (!allow.is_empty()).then_some(allow),
            top: usize::try_from(self.top).unwrap_or(usize::MAX),
            all: self.all,
            format: self.format,
            timeout: Duration::from_secs(self.timeout),
            config,
        })
    }
}
