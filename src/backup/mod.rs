//! Backing up the artifacts of one repository to local disk.
//!
//! - [`ArtifactReference`] - maps a download URL to a repository-relative path
//! - [`prepare_destination`] - creates `<root>/<repository>/<directory>`
//! - [`BackupRunner`] - the end-to-end flow
//!
//! Listing errors abort a run. Artifact errors abort it only under
//! [`FailurePolicy::Abort`]; the default records them in [`BackupStats`] and
//! carries on.

mod artifact;
mod error;
mod orchestrator;
mod storage;

pub use artifact::ArtifactReference;
pub use error::BackupError;
pub use orchestrator::{ArtifactFailure, BackupOptions, BackupRunner, BackupStats, FailurePolicy};
pub use storage::{DEFAULT_OUTPUT_ROOT, artifact_directory, prepare_destination};
