//! A MapReduce-compatible implementation of word count.
//!

use crate::{KeyValue, Token};
use anyhow::{anyhow, Result};

/// Emits `(token, 1)`.
pub fn map(token: Token) -> Result<KeyValue> {
    Ok(KeyValue::new(token, 1))
}

/// Sums the counts emitted for `key`.
///
/// Addition is checked; a total that does not fit in a `u64` fails the task
/// rather than wrapping.
pub fn reduce(key: &str, values: &[u64]) -> Result<u64> {
    values
        .iter()
        .try_fold(0u64, |acc, v| acc.checked_add(*v))
        .ok_or_else(|| anyhow!("count for `{key}` overflows u64"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_emits_one() {
        let kv = map("cat".to_string()).unwrap();
        assert_eq!(kv, KeyValue::new("cat".to_string(), 1));
    }

    #[test]
    fn reduce_sums_values() {
        assert_eq!(reduce("cat", &[1, 1, 1]).unwrap(), 3);
        assert_eq!(reduce("cat", &[]).unwrap(), 0);
    }

    #[test]
    fn reduce_reports_overflow() {
        let err = reduce("cat", &[u64::MAX, 1]).unwrap_err();
        assert!(err.to_string().contains("`cat`"));
    }
}
