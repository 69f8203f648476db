//! Utility functions for turning raw input bytes into text.
//!

use crate::Result;
use bytes::Bytes;

/// Read an entire [`Bytes`] slice into a [`String`].
///
/// Returns an error if the slice contains invalid UTF-8.
pub fn string_from_bytes(buf: Bytes) -> Result<String> {
    Ok(String::from_utf8(buf.as_ref().into())?)
}

/// Like [`string_from_bytes`], but replaces invalid sequences with
/// `U+FFFD` instead of failing.
pub fn string_from_bytes_lossy(buf: &Bytes) -> String {
    String::from_utf8_lossy(buf.as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn valid_utf8_round_trips() {
        let s = string_from_bytes(Bytes::from_static("naïve café".as_bytes())).unwrap();
        assert_eq!(s, "naïve café");
    }

    #[test]
    fn invalid_utf8() {
        let raw = Bytes::from_static(&[b'o', b'k', 0xff]);
        assert!(matches!(string_from_bytes(raw.clone()), Err(Error::Utf8(_))));
        assert_eq!(string_from_bytes_lossy(&raw), "ok\u{FFFD}");
    }
}
