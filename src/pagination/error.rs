//! Error types for cursor resolution and page aggregation.

use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors raised while walking the paginated asset listing.
///
/// All of them are fatal to a backup run: later cursors and pages cannot be
/// trusted once one step fails.
#[derive(Debug, Error)]
pub enum PaginationError {
    /// A continuation token is neither the sentinel nor 32 hexadecimal characters.
    #[error("token should be either a 32 character hexadecimal or \"null\" and not: {token}")]
    InvalidTokenFormat {
        /// The rejected token.
        token: String,
    },

    /// The `continuationToken` field could not be read from a listing page.
    #[error("failed to extract continuation token: {reason}")]
    TokenExtraction {
        /// Why extraction failed.
        reason: String,
    },

    /// The `items[].downloadUrl` fields could not be read from a listing page.
    #[error("failed to extract download URLs from page {page}: {reason}")]
    FieldExtraction {
        /// 1-based page number.
        page: usize,
        /// Why extraction failed.
        reason: String,
    },

    /// Refetching a listing page during aggregation failed.
    #[error("failed to fetch listing page {page}: {source}")]
    PageFetch {
        /// 1-based page number.
        page: usize,
        /// The underlying request failure.
        #[source]
        source: RepositoryError,
    },

    /// The service returned a cursor that was already visited.
    #[error("continuation token {token} was returned twice; the listing would never end")]
    CursorCycle {
        /// The repeated token.
        token: String,
    },

    /// A request issued while resolving a cursor failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl PaginationError {
    /// Creates an invalid token format error.
    pub fn invalid_token_format(token: impl Into<String>) -> Self {
        Self::InvalidTokenFormat {
            token: token.into(),
        }
    }

    /// Creates a token extraction error.
    pub fn token_extraction(reason: impl Into<String>) -> Self {
        Self::TokenExtraction {
            reason: reason.into(),
        }
    }

    /// Creates a field extraction error for a 1-based page number.
    pub fn field_extraction(page: usize, reason: impl Into<String>) -> Self {
        Self::FieldExtraction {
            page,
            reason: reason.into(),
        }
    }
}
