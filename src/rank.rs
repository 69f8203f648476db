//! Top-N selection over a finished frequency map.
//!
//! Entries are ordered by count, highest first. Equal counts are ordered by
//! the word itself, byte-wise ascending, so the output never depends on the
//! hash map's iteration order.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::Serialize;

use crate::{Error, Result, Token, WordFrequencies};

/// One `(word, count)` row of a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub word: Token,
    pub count: u64,
}

impl From<(&str, u64)> for RankedEntry {
    fn from((word, count): (&str, u64)) -> Self {
        Self {
            word: word.to_string(),
            count,
        }
    }
}

fn by_rank(a: &(&Token, &u64), b: &(&Token, &u64)) -> Ordering {
    b.1.cmp(a.1).then_with(|| a.0.cmp(b.0))
}

/// Every entry of `freq`, in rank order.
pub fn ranked(freq: &WordFrequencies) -> Vec<RankedEntry> {
    freq.iter()
        .sorted_by(by_rank)
        .map(|(word, count)| RankedEntry {
            word: word.clone(),
            count: *count,
        })
        .collect()
}

/// The `n` highest-ranked entries of `freq`.
///
/// Fails with [`Error::InvalidArgument`] when `n` is zero. An empty map
/// ranks to an empty sequence.
pub fn top_n(freq: &WordFrequencies, n: usize) -> Result<Vec<RankedEntry>> {
    if n == 0 {
        return Err(Error::InvalidArgument("n must be positive".into()));
    }
    Ok(freq
        .iter()
        .k_smallest_by(n, by_rank)
        .map(|(word, count)| RankedEntry {
            word: word.clone(),
            count: *count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freq(pairs: &[(&str, u64)]) -> WordFrequencies {
        pairs.iter().map(|(w, c)| (w.to_string(), *c)).collect()
    }

    fn entries(pairs: &[(&str, u64)]) -> Vec<RankedEntry> {
        pairs.iter().map(|&p| RankedEntry::from(p)).collect()
    }

    #[test]
    fn ties_break_on_word() {
        let f = freq(&[("cat", 2), ("The", 2), ("sat", 1), ("ran", 1)]);
        assert_eq!(top_n(&f, 2).unwrap(), entries(&[("The", 2), ("cat", 2)]));
        assert_eq!(
            top_n(&f, 10).unwrap(),
            entries(&[("The", 2), ("cat", 2), ("ran", 1), ("sat", 1)])
        );
    }

    #[test]
    fn higher_counts_come_first() {
        let f = freq(&[("a", 1), ("b", 5), ("c", 3)]);
        assert_eq!(top_n(&f, 2).unwrap(), entries(&[("b", 5), ("c", 3)]));
    }

    #[test]
    fn zero_is_invalid() {
        let f = freq(&[("a", 1)]);
        assert!(matches!(top_n(&f, 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn empty_map_ranks_to_nothing() {
        assert!(top_n(&WordFrequencies::new(), 5).unwrap().is_empty());
        assert!(ranked(&WordFrequencies::new()).is_empty());
    }

    #[test]
    fn ranking_is_deterministic() {
        let f: WordFrequencies = (0..500u64).map(|i| (format!("w{i}"), i % 7)).collect();
        let first = top_n(&f, 40).unwrap();
        for _ in 0..5 {
            assert_eq!(top_n(&f, 40).unwrap(), first);
        }
        assert_eq!(first, ranked(&f)[..40].to_vec());
    }
}
