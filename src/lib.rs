//! Nexus Backup Library
//!
//! Backs up every artifact stored in a Nexus repository by walking the
//! paginated asset listing API and downloading each artifact to local disk,
//! recreating its repository-relative directory structure.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`repository`] - Repository target and authenticated HTTP client
//! - [`pagination`] - Continuation tokens, cursor chain, URL aggregation
//! - [`backup`] - Artifact path resolution and the download orchestrator
//! - [`progress`] - Observer hooks for progress display

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod pagination;
pub mod progress;
pub mod repository;
mod user_agent;

// Re-export commonly used types
pub use backup::{
    ArtifactReference, BackupError, BackupOptions, BackupRunner, BackupStats, FailurePolicy,
};
pub use pagination::{ContinuationToken, CursorChain, PaginationError};
pub use progress::{BackupEvent, BackupObserver, NoopObserver};
pub use repository::{Credentials, RepositoryClient, RepositoryError, RepositoryTarget};
