//! Deriving an artifact's repository-relative location from its download URL.

use std::path::PathBuf;

use tracing::debug;
use url::Url;

use super::error::BackupError;

/// A download URL plus the directory and file name it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    url: String,
    directory: String,
    filename: String,
}

impl ArtifactReference {
    /// Parses `url` as `<base>/<repository>/<directory-path>/<filename>`.
    ///
    /// The last path segment equal to `repository` that is followed by at
    /// least one more segment marks the start of the artifact path. The final
    /// segment is the file name; everything between is the directory, which
    /// is empty for artifacts at the repository root. Query and fragment are
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`BackupError::InvalidUrl`] when `url` is not an absolute http(s) URL
    /// - [`BackupError::PathExtraction`] when no repository segment with a
    ///   non-empty file name after it exists
    pub fn resolve(url: &str, repository: &str) -> Result<Self, BackupError> {
        let parsed = Url::parse(url).map_err(|_| BackupError::invalid_url(url))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(BackupError::invalid_url(url));
        }

        let segments: Vec<&str> = parsed
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();

        let candidates = &segments[..segments.len().saturating_sub(1)];
        let Some(repository_index) = candidates.iter().rposition(|s| *s == repository) else {
            return Err(BackupError::path_extraction(url, repository));
        };

        let Some((filename, directory)) = segments[repository_index + 1..].split_last() else {
            return Err(BackupError::path_extraction(url, repository));
        };
        if filename.is_empty() {
            return Err(BackupError::path_extraction(url, repository));
        }

        let directory = directory.join("/");
        debug!(url, directory = %directory, filename = %filename, "resolved artifact path");

        Ok(Self {
            url: url.to_string(),
            directory,
            filename: (*filename).to_string(),
        })
    }

    /// The download URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Directory below the repository root, `/`-separated; empty at the root.
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.directory
    }

    /// The artifact file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// `directory/filename` as a relative path.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        self.relative_directory().join(&self.filename)
    }

    /// The directory as a relative path.
    #[must_use]
    pub fn relative_directory(&self) -> PathBuf {
        self.directory
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect()
    }
}
