use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use wordfreq::chart::BarChart;
use wordfreq::cmd::wordfreq::{Args, Format, Job, Source};
use wordfreq::rank::{self, RankedEntry};
use wordfreq::standalone::MapReduce;
use wordfreq::*;

async fn load_text(job: &Job) -> Result<String> {
    let text = match &job.source {
        Source::Url(url) => source::fetch_text(url, job.timeout)
            .await
            .with_context(|| format!("could not load text from {url}"))?,
        Source::Files(pattern) => source::read_inputs(pattern)
            .with_context(|| format!("could not read input files `{pattern}`"))?,
        Source::Stdin => source::read_stdin().context("could not read standard input")?,
    };
    Ok(text)
}

fn print_results(job: &Job, freq: &WordFrequencies) -> Result<()> {
    let (title, entries): (String, Vec<RankedEntry>) = if job.all {
        (format!("All {} words by frequency", freq.len()), rank::ranked(freq))
    } else {
        (
            format!("Top {} words by frequency", job.top),
            rank::top_n(freq, job.top)?,
        )
    };

    let mut stdout = std::io::stdout().lock();
    match job.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, &entries)?;
            writeln!(stdout)?;
        }
        Format::Text => {
            writeln!(stdout, "{title}")?;
            for entry in &entries {
                writeln!(stdout, "{}: {}", entry.word, entry.count)?;
            }
            writeln!(stdout)?;
            write!(stdout, "{}", BarChart::new(title).render(&entries))?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_tracing(args.verbose);

    let job = args.into_job()?;
    let text = load_text(&job).await?;
    info!(bytes = text.len(), "text loaded");

    let mr = MapReduce::new(job.config.clone())?;
    info!(
        workers = mr.workers(),
        batch_size = mr.config().batch_size,
        "pipeline ready"
    );
    let allow = job.allow.clone();
    let freq = tokio::task::spawn_blocking(move || mr.run(&text, allow.as_ref()))
        .await
        .context("word count task did not complete")??;

    print_results(&job, &freq)
}
