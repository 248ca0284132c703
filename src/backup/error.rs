//! Error types for the backup run.

use std::path::PathBuf;

use thiserror::Error;

use crate::pagination::PaginationError;
use crate::repository::RepositoryError;

/// Errors raised by a backup run.
///
/// [`Pagination`](Self::Pagination) is always fatal. The others concern a
/// single artifact; whether they stop the run depends on the
/// [`FailurePolicy`](super::FailurePolicy).
#[derive(Debug, Error)]
pub enum BackupError {
    /// Listing could not be walked.
    #[error(transparent)]
    Pagination(#[from] PaginationError),

    /// A download URL is not an absolute http(s) URL.
    #[error("{url} is not an URL")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
    },

    /// No artifact path could be derived from a download URL.
    #[error("URL '{url}' does not contain an artifact path below repository '{repository}'")]
    PathExtraction {
        /// The download URL.
        url: String,
        /// The repository segment that was looked for.
        repository: String,
    },

    /// Fetching or writing an artifact body failed.
    #[error("failed to download {url}: {source}")]
    Download {
        /// The download URL.
        url: String,
        /// The underlying failure.
        #[source]
        source: RepositoryError,
    },

    /// A local directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    Filesystem {
        /// The directory being created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl BackupError {
    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a path extraction error.
    pub fn path_extraction(url: impl Into<String>, repository: impl Into<String>) -> Self {
        Self::PathExtraction {
            url: url.into(),
            repository: repository.into(),
        }
    }

    /// Creates a download error.
    pub fn download(url: impl Into<String>, source: RepositoryError) -> Self {
        Self::Download {
            url: url.into(),
            source,
        }
    }

    /// Creates a filesystem error.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
