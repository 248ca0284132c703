//! Top-level backup flow: chain, aggregate, download.
//!
//! # Example
//!
//! ```no_run
//! use nexus_backup::backup::{BackupOptions, BackupRunner};
//! use nexus_backup::progress::NoopObserver;
//! use nexus_backup::repository::{Credentials, RepositoryClient, RepositoryTarget};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let target = RepositoryTarget::new(
//!     "https://nexus.example.com",
//!     Credentials::new("admin", "admin123"),
//!     "maven-releases",
//!     "v1",
//! )?;
//! let runner = BackupRunner::new(RepositoryClient::new(target)?, BackupOptions::default());
//! let stats = runner.run(&NoopObserver).await?;
//! println!("saved {} of {} artifacts", stats.downloaded(), stats.discovered());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use super::artifact::ArtifactReference;
use super::error::BackupError;
use super::storage::{DEFAULT_OUTPUT_ROOT, prepare_destination};
use crate::pagination::{build_chain, collect_artifact_urls};
use crate::progress::{BackupEvent, BackupObserver};
use crate::repository::RepositoryClient;

/// What to do when a single artifact cannot be resolved or downloaded.
///
/// Listing failures are always fatal; this only governs artifact-level errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and move on to the next artifact.
    #[default]
    Continue,
    /// Stop the run and return the failure.
    Abort,
}

/// Settings for a backup run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    /// Root under which `<repository>/...` is written.
    pub output_root: PathBuf,
    /// Artifact-level failure handling.
    pub failure_policy: FailurePolicy,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            failure_policy: FailurePolicy::default(),
        }
    }
}

/// An artifact that was skipped under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct ArtifactFailure {
    /// The download URL.
    pub url: String,
    /// Why it failed.
    pub error: BackupError,
}

/// Outcome of a completed backup run.
#[derive(Debug, Default)]
pub struct BackupStats {
    pages: usize,
    discovered: usize,
    downloaded: usize,
    bytes: u64,
    failures: Vec<ArtifactFailure>,
}

impl BackupStats {
    /// Listing pages in the cursor chain.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Artifact URLs found by aggregation.
    #[must_use]
    pub fn discovered(&self) -> usize {
        self.discovered
    }

    /// Artifacts written to disk.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Artifacts that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Total bytes written.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// The failed artifacts, in download order.
    #[must_use]
    pub fn failures(&self) -> &[ArtifactFailure] {
        &self.failures
    }
}

/// Backs up every artifact of one repository, one request at a time.
#[derive(Debug, Clone)]
pub struct BackupRunner {
    client: RepositoryClient,
    options: BackupOptions,
}

impl BackupRunner {
    /// Creates a runner for the client's target.
    #[must_use]
    pub fn new(client: RepositoryClient, options: BackupOptions) -> Self {
        Self { client, options }
    }

    /// The options this runner was built with.
    #[must_use]
    pub fn options(&self) -> &BackupOptions {
        &self.options
    }

    /// Runs the backup.
    ///
    /// 1. Builds the cursor chain
    /// 2. Aggregates download URLs (none for a single-page chain)
    /// 3. Downloads each URL in order to
    ///    `<output_root>/<repository>/<directory>/<filename>`, overwriting existing files
    ///
    /// Zero URLs is a successful run with nothing written.
    ///
    /// # Errors
    ///
    /// Returns [`BackupError::Pagination`] when the listing cannot be walked.
    /// Under [`FailurePolicy::Abort`], also returns the first artifact error.
    #[instrument(skip_all, fields(repository = %self.client.target().repository()))]
    pub async fn run(&self, observer: &dyn BackupObserver) -> Result<BackupStats, BackupError> {
        let repository = self.client.target().repository();

        let chain = build_chain(&self.client).await?;
        observer.on_event(&BackupEvent::ChainResolved { pages: chain.len() });

        info!("Assembling download URLs '{repository}'");
        let urls = collect_artifact_urls(&self.client, &chain, observer).await?;
        observer.on_event(&BackupEvent::ArtifactsDiscovered { total: urls.len() });

        let mut stats = BackupStats {
            pages: chain.len(),
            discovered: urls.len(),
            ..BackupStats::default()
        };

        if urls.is_empty() {
            info!("No artifacts found in '{repository}'");
            return Ok(stats);
        }

        info!(artifacts = urls.len(), "Backing up artifacts '{repository}'");
        for url in urls {
            match self.backup_artifact(&url).await {
                Ok((path, bytes)) => {
                    stats.downloaded += 1;
                    stats.bytes += bytes;
                    observer.on_event(&BackupEvent::ArtifactSaved {
                        url: &url,
                        path: &path,
                        bytes,
                    });
                }
                Err(error) => {
                    warn!(url = %url, error = %error, "artifact backup failed");
                    observer.on_event(&BackupEvent::ArtifactFailed {
                        url: &url,
                        error: &error,
                    });
                    match self.options.failure_policy {
                        FailurePolicy::Abort => return Err(error),
                        FailurePolicy::Continue => {
                            stats.failures.push(ArtifactFailure { url, error });
                        }
                    }
                }
            }
        }

        info!(
            downloaded = stats.downloaded,
            failed = stats.failed(),
            bytes = stats.bytes,
            "Backup of '{repository}' finished"
        );
        Ok(stats)
    }

    async fn backup_artifact(&self, url: &str) -> Result<(PathBuf, u64), BackupError> {
        let repository = self.client.target().repository();
        let artifact = ArtifactReference::resolve(url, repository)?;
        let path = prepare_destination(&self.options.output_root, repository, &artifact).await?;
        let bytes = self
            .client
            .download_to_path(artifact.url(), &path)
            .await
            .map_err(|source| BackupError::download(url, source))?;
        Ok((path, bytes))
    }
}
