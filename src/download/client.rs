//! HTTP client wrapper for probing and downloading media files.
//!
//! Two operations, matching the two halves of the skip decision: a
//! header-only content-length probe, and a streaming body transfer to disk.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::Client;
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};
use url::Url;

use super::constants::{
    CONNECT_TIMEOUT_SECS, PROBE_TIMEOUT_SECS, TRANSFER_TIMEOUT_SECS, USER_AGENT,
};
use super::error::DownloadError;

/// HTTP client for media downloads with streaming support.
///
/// Created once and reused across episodes, taking advantage of connection
/// pooling. Probe requests and body transfers carry separate per-request
/// timeouts; episode audio can legitimately take a long time to transfer.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    probe_timeout: Duration,
    transfer_timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a client with the default timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(
            Duration::from_secs(PROBE_TIMEOUT_SECS),
            Duration::from_secs(TRANSFER_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit probe and transfer timeouts.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails with the static
    /// configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(probe_timeout: Duration, transfer_timeout: Duration) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            client,
            probe_timeout,
            transfer_timeout,
        }
    }

    /// Returns the declared content length of a remote resource without
    /// transferring its body.
    ///
    /// Issues a GET, reads the headers, and drops the response before the
    /// body is consumed. A missing Content-Length header counts as 0.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on network failure, timeout, or a
    /// non-success HTTP status.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn content_length(&self, url: &Url) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
        }

        let length = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(0);

        debug!(length, "content length probe");
        Ok(length)
    }

    /// Streams a remote body to `path`, truncating any existing file.
    ///
    /// A partially written file left by a failed transfer is removed so a
    /// later run sees either a complete file or none at all.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] on network failure, timeout, a non-success
    /// HTTP status, or a filesystem error.
    #[instrument(skip(self), fields(url = %url, path = %path.display()))]
    pub async fn fetch_to_file(&self, url: &Url, path: &Path) -> Result<u64, DownloadError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.transfer_timeout)
            .send()
            .await
            .map_err(|e| map_request_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::http_status(url.as_str(), status.as_u16()));
        }

        let mut file = File::create(path)
            .await
            .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;
        if stream_result.is_err() {
            debug!("cleaning up partial file after transfer error");
            let _ = tokio::fs::remove_file(path).await;
        }
        stream_result
    }

    /// Returns a reference to the underlying reqwest client, used for
    /// requests outside the probe/transfer pair (feed retrieval).
    #[must_use]
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

/// Streams response body to file, returning bytes written.
///
/// Extracted so the caller can clean up the partial file on error.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &Url,
    path: &Path,
) -> Result<u64, DownloadError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| map_request_error(url, e))?;

        writer
            .write_all(&chunk)
            .await
            .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(path.to_path_buf(), e))?;

    Ok(bytes_written)
}

fn map_request_error(url: &Url, error: reqwest::Error) -> DownloadError {
    if error.is_timeout() {
        DownloadError::timeout(url.as_str())
    } else {
        DownloadError::network(url.as_str(), error)
    }
}
