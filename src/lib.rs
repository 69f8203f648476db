//! A word-frequency analysis pipeline built on an in-process MapReduce.
//!
//! Text is normalized into tokens, each token is mapped to a `(token, 1)`
//! pair on a worker pool, the pairs are shuffled into per-word groups, and
//! the groups are reduced (summed) on the same pool. The resulting
//! [`WordFrequencies`] can then be ranked with [`rank::top_n`].
//!
//! # Example
//!
//! ```
//! # use wordfreq::{rank, standalone::MapReduce, PipelineConfig};
//! # fn main() -> wordfreq::Result<()> {
//! let mr = MapReduce::new(PipelineConfig::default())?;
//! let freq = mr.run("The cat sat. The cat ran!", None)?;
//! assert_eq!(freq["cat"], 2);
//!
//! let top = rank::top_n(&freq, 2)?;
//! assert_eq!(top[0].word, "The");
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hasher;

pub mod chart;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod rank;
pub mod source;
pub mod standalone;
pub mod utils;
pub mod workload;

pub use config::PipelineConfig;
pub use error::{Error, Result};

/////////////////////////////////////////////////////////////////////////////
// MapReduce application types
/////////////////////////////////////////////////////////////////////////////

/// A single word, already stripped of punctuation. Case is preserved.
pub type Token = String;

/// Every value emitted for a key, in the order the mapper produced them.
pub type Groups = HashMap<Token, Vec<u64>>;

/// The final artifact of a run: each distinct token and its total count.
pub type WordFrequencies = HashMap<Token, u64>;

/// An optional vocabulary restricting which tokens are counted.
pub type AllowSet = HashSet<Token>;

/// A map function turns one token into one intermediate key-value pair.
///
/// Errors are reported by the worker pool as a failed task.
pub type MapFn = fn(token: Token) -> anyhow::Result<KeyValue>;

/// A reduce function folds every value emitted for `key` into a single count.
pub type ReduceFn = fn(key: &str, values: &[u64]) -> anyhow::Result<u64>;

/// A map reduce application.
#[derive(Copy, Clone)]
pub struct Workload {
    pub map_fn: MapFn,
    pub reduce_fn: ReduceFn,
}

/////////////////////////////////////////////////////////////////////////////
// Key-value pairs
/////////////////////////////////////////////////////////////////////////////

/// A single intermediate key-value pair.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyValue {
    /// The key.
    pub key: Token,
    /// The value.
    pub value: u64,
}

impl KeyValue {
    /// Construct a new key-value pair from the given key and value.
    pub fn new(key: Token, value: u64) -> Self {
        Self { key, value }
    }

    /// Get the key of this key-value pair.
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Consumes the key-value pair and returns the key and value.
    #[inline]
    pub fn into_parts(self) -> (Token, u64) {
        (self.key, self.value)
    }
}

/// Hashes an intermediate key. Compute a reduce bucket for a given key
/// by calculating `ihash(key) % n_reduce`.
pub fn ihash(key: &[u8]) -> u32 {
    let mut hasher = fnv::FnvHasher::with_key(0);
    hasher.write(key);
    (hasher.finish() & 0x7fffffff) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ihash_is_stable_and_positive() {
        let a = ihash(b"cat");
        assert_eq!(a, ihash(b"cat"));
        assert!(a <= 0x7fffffff);
        assert_ne!(ihash(b"cat"), ihash(b"dog"));
    }

    #[test]
    fn key_value_parts() {
        let kv = KeyValue::new("word".to_string(), 1);
        assert_eq!(kv.key(), "word");
        assert_eq!(kv.into_parts(), ("word".to_string(), 1));
    }
}
