//! Access to the remote repository service.
//!
//! - [`RepositoryTarget`] - immutable description of the service and repository
//! - [`RepositoryClient`] - authenticated GET requests with strict status checking
//! - [`RepositoryError`] - transport, status and construction failures

mod client;
mod constants;
mod error;
mod target;

pub use client::RepositoryClient;
pub use constants::{CONNECT_TIMEOUT_SECS, DEFAULT_API_VERSION, PING_PATH, READ_TIMEOUT_SECS};
pub use error::RepositoryError;
pub use target::{Credentials, RepositoryTarget};
