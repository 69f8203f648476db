use itertools::Itertools;
use tracing::trace;

use crate::error::Phase;
use crate::standalone::pool::WorkerPool;
use crate::*;

// types related to this engine
type Bucket = Vec<(Token, Vec<u64>)>;

/// Keeps only the tokens present in `allow`, preserving order and
/// multiplicity. A missing or empty set keeps everything.
pub fn filter_tokens(tokens: Vec<Token>, allow: Option<&AllowSet>) -> Vec<Token> {
    match allow {
        Some(allow) if !allow.is_empty() => tokens
            .into_iter()
            .filter(|token| allow.contains(token))
            .collect(),
        _ => tokens,
    }
}

/// Applies the workload's map function to every token, `batch_size` tokens
/// per pool task.
///
/// The pairs come back batch by batch; no token is dropped or duplicated.
pub fn perform_map(
    pool: &WorkerPool,
    engine: &Workload,
    tokens: Vec<Token>,
    batch_size: usize,
) -> Result<Vec<KeyValue>> {
    if batch_size == 0 {
        return Err(Error::InvalidArgument("batch_size must be positive".into()));
    }
    let batches = tokens
        .into_iter()
        .chunks(batch_size)
        .into_iter()
        .map(|chunk| chunk.collect::<Vec<Token>>())
        .collect::<Vec<_>>();
    trace!(batches = batches.len(), "map batches prepared");

    let map_func = engine.map_fn;
    let mapped = pool.run_tasks(Phase::Map, batches, |batch| {
        batch
            .into_iter()
            .map(map_func)
            .collect::<anyhow::Result<Vec<KeyValue>>>()
    })?;

    Ok(mapped.into_iter().flatten().collect())
}

/// Groups the mapped pairs by key.
///
/// Runs on the calling thread; the total number of grouped values always
/// equals `mapped.len()`.
pub fn shuffle(mapped: Vec<KeyValue>) -> Groups {
    let mut groups = Groups::new();
    for kv in mapped {
        let (key, value) = kv.into_parts();
        groups.entry(key).or_default().push(value);
    }
    groups
}

/// Reduces every group on the pool and merges the results.
///
/// Groups are spread over `num_buckets` reduce tasks by `ihash(key)`, so
/// each key is reduced by exactly one task.
pub fn perform_reduce(
    pool: &WorkerPool,
    engine: &Workload,
    groups: Groups,
    num_buckets: usize,
) -> Result<WordFrequencies> {
    if num_buckets == 0 {
        return Err(Error::InvalidArgument("num_buckets must be positive".into()));
    }
    let mut buckets: Vec<Bucket> = (0..num_buckets).map(|_| Vec::new()).collect();
    for (key, values) in groups {
        let bucket_no = ihash(key.as_bytes()) as usize % num_buckets;
        buckets[bucket_no].push((key, values));
    }
    buckets.retain(|bkt| !bkt.is_empty());
    trace!(buckets = buckets.len(), "reduce buckets prepared");

    let reduce_func = engine.reduce_fn;
    let reduced = pool.run_tasks(Phase::Reduce, buckets, |bkt| {
        bkt.into_iter()
            .map(|(key, values)| -> anyhow::Result<(Token, u64)> {
                let total = reduce_func(&key, &values)?;
                Ok((key, total))
            })
            .collect::<anyhow::Result<Vec<(Token, u64)>>>()
    })?;

    Ok(reduced.into_iter().flatten().collect())
}
