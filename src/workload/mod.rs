//! Converts MapReduce application names to actual application code.
//!
//! # Example
//!
//! To get the word count application:
//! ```
//! # use wordfreq::Result;
//! use wordfreq::workload;
//! # fn main() -> Result<()> {
//! let wc = workload::named("wc")?;
//! let kv = (wc.map_fn)("cat".to_string()).unwrap();
//! assert_eq!(kv.value, 1);
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result, Workload};

pub mod wc;

/// Gets the [`Workload`] named `name`.
///
/// Returns [`None`] if no application with the given name was found.
pub fn try_named(name: &str) -> Option<Workload> {
    match name {
        "wc" => Some(Workload {
            map_fn: wc::map,
            reduce_fn: wc::reduce,
        }),
        _ => None,
    }
}

/// Gets the [`Workload`] named `name`.
///
/// Returns [`Error::InvalidArgument`] if no application with the given name was found.
pub fn named(name: &str) -> Result<Workload> {
    try_named(name).ok_or_else(|| Error::InvalidArgument(format!("no workload named `{name}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_workload_is_rejected() {
        assert!(try_named("grep").is_none());
        assert!(matches!(named("grep"), Err(Error::InvalidArgument(_))));
    }
}
