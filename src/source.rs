//! Where the text comes from: an HTTP URL, local files, or stdin.
//!
//! None of this is needed by the pipeline itself, which only ever sees a
//! `&str`.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use bytes::Bytes;
use glob::glob;
use tracing::{debug, info};

use crate::utils::{string_from_bytes, string_from_bytes_lossy};
use crate::{Error, Result};

/// Downloads `url` and returns its body as text.
///
/// Non-2xx responses fail with [`Error::HttpStatus`]; the whole request,
/// body included, must finish within `timeout`.
pub async fn fetch_text(url: &str, timeout: Duration) -> Result<String> {
    info!(url, "fetching text");
    tokio::time::timeout(timeout, get_text(url))
        .await
        .map_err(|_| Error::Timeout(timeout))?
}

async fn get_text(url: &str) -> Result<String> {
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus {
            url: url.to_string(),
            status,
        });
    }
    let body = response.bytes().await?;
    debug!(bytes = body.len(), "download complete");
    Ok(string_from_bytes_lossy(&body))
}

/// Reads every file matching `pattern`, in path order, and joins them with
/// newlines.
pub fn read_inputs(pattern: &str) -> Result<String> {
    let mut paths = glob(pattern)?
        .flatten()
        .filter(|p| p.is_file())
        .collect::<Vec<PathBuf>>();
    if paths.is_empty() {
        return Err(Error::NoInput(pattern.to_string()));
    }
    paths.sort();

    let mut texts = Vec::with_capacity(paths.len());
    for path in paths {
        let buf = std::fs::read(&path).map_err(|source| Error::Read {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = buf.len(), "read input file");
        texts.push(string_from_bytes(Bytes::from(buf))?);
    }
    Ok(texts.join("\n"))
}

/// Reads all of standard input.
pub fn read_stdin() -> Result<String> {
    let mut buf = Vec::new();
    std::io::stdin().lock().read_to_end(&mut buf)?;
    string_from_bytes(Bytes::from(buf))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn reads_matching_files_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "second").unwrap();
        fs::write(dir.path().join("a.txt"), "first").unwrap();
        fs::write(dir.path().join("c.md"), "ignored").unwrap();

        let pattern = format!("{}/*.txt", dir.path().display());
        assert_eq!(read_inputs(&pattern).unwrap(), "first\nsecond");
    }

    #[test]
    fn no_match_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.txt", dir.path().display());
        assert!(matches!(read_inputs(&pattern), Err(Error::NoInput(_))));
    }

    #[test]
    fn bad_pattern_is_an_error() {
        assert!(matches!(read_inputs("[unclosed"), Err(Error::Pattern(_))));
    }

    /// Serves a single canned HTTP response on a local port.
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}/book.txt")
    }

    #[tokio::test]
    async fn fetches_body_on_success() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 12\r\nConnection: close\r\n\r\nThe cat sat.",
        )
        .await;
        let text = fetch_text(&url, Duration::from_secs(5)).await.unwrap();
        assert_eq!(text, "The cat sat.");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        match fetch_text(&url, Duration::from_secs(5)).await {
            Err(Error::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_fetch_error() {
        let err = fetch_text("http://127.0.0.1:1/book.txt", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Fetch(_) | Error::Timeout(_)));
    }
}
