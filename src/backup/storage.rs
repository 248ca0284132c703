//! Local layout of a backup: `<root>/<repository>/<directory>/<filename>`.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::artifact::ArtifactReference;
use super::error::BackupError;

/// Default backup root, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "download";

/// Directory that holds `artifact`: `<root>/<repository>/<directory>`.
#[must_use]
pub fn artifact_directory(root: &Path, repository: &str, artifact: &ArtifactReference) -> PathBuf {
    root.join(repository).join(artifact.relative_directory())
}

/// Creates the artifact's directory (and parents) and returns the file path to write.
///
/// # Errors
///
/// Returns [`BackupError::Filesystem`] when the directory cannot be created.
pub async fn prepare_destination(
    root: &Path,
    repository: &str,
    artifact: &ArtifactReference,
) -> Result<PathBuf, BackupError> {
    let directory = artifact_directory(root, repository, artifact);
    tokio::fs::create_dir_all(&directory)
        .await
        .map_err(|e| BackupError::filesystem(directory.clone(), e))?;
    debug!(directory = %directory.display(), "artifact directory ready");
    Ok(directory.join(artifact.filename()))
}
