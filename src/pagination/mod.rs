//! Walking the paginated asset listing.
//!
//! A listing is a linked list of pages: each page names the token of the next
//! one, and the sentinel `null` ends the list. Walking it takes two passes:
//!
//! 1. [`build_chain`] follows tokens from the sentinel until the sentinel
//!    comes back, producing a [`CursorChain`]
//! 2. [`collect_artifact_urls`] refetches every page in the chain and
//!    gathers its `items[].downloadUrl` values
//!
//! Both passes go through a [`ListingSource`], which [`RepositoryClient`]
//! implements.
//!
//! [`RepositoryClient`]: crate::repository::RepositoryClient

mod aggregator;
mod chain;
mod error;
mod listing;
mod resolver;
mod source;
mod token;

pub use aggregator::collect_artifact_urls;
pub use chain::{CursorChain, build_chain};
pub use error::PaginationError;
pub use listing::ListingPage;
pub use resolver::resolve_next;
pub use source::ListingSource;
pub use token::{ContinuationToken, SENTINEL, TOKEN_LENGTH};
