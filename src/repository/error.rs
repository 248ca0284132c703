//! Error types for the repository module.
//!
//! Every variant carries the URL or path it concerns so callers can report
//! the failing request without extra bookkeeping.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while talking to the repository service.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Connection-level failure (DNS, refused connection, TLS, timeout, broken body stream).
    #[error("transport error requesting {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with anything other than 200.
    #[error("HTTP {status} requesting {url}. Does the URL exist?")]
    UnexpectedStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The configured service base URL is not an absolute http(s) URL.
    #[error("invalid repository base URL: {url}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
    },

    /// The repository target is missing a required part.
    #[error("invalid repository target: {reason}")]
    InvalidTarget {
        /// What is wrong with the target.
        reason: String,
    },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// Writing a streamed body to disk failed.
    #[error("IO error writing to {path}: {source}")]
    Filesystem {
        /// The file being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl RepositoryError {
    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    /// Creates an unexpected-status error.
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an invalid base URL error.
    pub fn invalid_base_url(url: impl Into<String>) -> Self {
        Self::InvalidBaseUrl { url: url.into() }
    }

    /// Creates an invalid target error.
    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    /// Creates a filesystem error.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the request URL this error concerns, when there is one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Transport { url, .. }
            | Self::UnexpectedStatus { url, .. }
            | Self::InvalidBaseUrl { url } => Some(url),
            Self::InvalidTarget { .. } | Self::ClientBuild { .. } | Self::Filesystem { .. } => None,
        }
    }
}

// No From<reqwest::Error> / From<std::io::Error>: the variants need the URL or
// path, which the source errors don't carry. Use the constructors above.
