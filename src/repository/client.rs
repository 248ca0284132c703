//! Authenticated HTTP client for the repository service.
//!
//! This module provides the `RepositoryClient` struct, the only component that
//! issues network requests. It enforces a 200 status on every response and
//! never retries.

use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, instrument};

use super::constants::{CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS};
use super::error::RepositoryError;
use super::target::RepositoryTarget;
use crate::user_agent;

const ACCEPT_JSON: &str = "application/json";

/// HTTP client bound to one [`RepositoryTarget`].
///
/// Created once per run and passed explicitly to every operation; cloning is
/// cheap and shares the connection pool.
///
/// # Example
///
/// ```no_run
/// use nexus_backup::repository::{Credentials, RepositoryClient, RepositoryTarget};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let target = RepositoryTarget::new(
///     "https://nexus.example.com",
///     Credentials::new("admin", "admin123"),
///     "maven-releases",
///     "v1",
/// )?;
/// let client = RepositoryClient::new(target)?;
/// let url = client.target().assets_url(None)?;
/// let body = client.fetch(url.as_str()).await?;
/// println!("first page: {} bytes", body.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RepositoryClient {
    client: Client,
    target: RepositoryTarget,
}

impl RepositoryClient {
    /// Creates a client with default timeouts (30s connect, 5min read).
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(target: RepositoryTarget) -> Result<Self, RepositoryError> {
        Self::with_timeouts(target, CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a client with explicit timeout values in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn with_timeouts(
        target: RepositoryTarget,
        connect_timeout_secs: u64,
        read_timeout_secs: u64,
    ) -> Result<Self, RepositoryError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .map_err(|source| RepositoryError::ClientBuild { source })?;
        Ok(Self { client, target })
    }

    /// The target every request is authenticated against.
    #[must_use]
    pub fn target(&self) -> &RepositoryTarget {
        &self.target
    }

    /// Fetches `url` and returns the whole response body.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Transport`] on connection or body read
    /// failure and [`RepositoryError::UnexpectedStatus`] when the status is not 200.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, RepositoryError> {
        let response = self.send(url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| RepositoryError::transport(url, e))?;
        debug!(bytes = body.len(), "fetched response body");
        Ok(body.to_vec())
    }

    /// Streams the body of `url` into `path`, truncating any existing file.
    ///
    /// The parent directory must already exist. A partially written file is
    /// removed when the transfer fails midway.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`fetch`](Self::fetch), plus
    /// [`RepositoryError::Filesystem`] when the file cannot be created or written.
    #[instrument(skip(self, path), fields(url = %url, path = %path.display()))]
    pub async fn download_to_path(&self, url: &str, path: &Path) -> Result<u64, RepositoryError> {
        let response = self.send(url).await?;

        let mut file = File::create(path)
            .await
            .map_err(|e| RepositoryError::filesystem(path, e))?;

        let stream_result = stream_to_file(&mut file, response, url, path).await;
        if stream_result.is_err() {
            debug!("cleaning up partial file after error");
            let _ = tokio::fs::remove_file(path).await;
        }
        let bytes_written = stream_result?;

        debug!(bytes = bytes_written, "artifact written");
        Ok(bytes_written)
    }

    /// Checks the service health endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Transport`] or
    /// [`RepositoryError::UnexpectedStatus`] when the service is unreachable or unhealthy.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        let url = self.target.ping_url()?;
        self.send(url.as_str()).await?;
        debug!("repository service responded to ping");
        Ok(())
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, RepositoryError> {
        let credentials = self.target.credentials();
        let response = self
            .client
            .get(url)
            .basic_auth(credentials.username(), Some(credentials.password()))
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| RepositoryError::transport(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(status = status.as_u16(), "unexpected response status");
            return Err(RepositoryError::unexpected_status(url, status.as_u16()));
        }
        Ok(response)
    }
}

/// Streams response body to file, returning bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    path: &Path,
) -> Result<u64, RepositoryError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| RepositoryError::transport(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| RepositoryError::filesystem(path, e))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .map_err(|e| RepositoryError::filesystem(path, e))?;

    Ok(bytes_written)
}
