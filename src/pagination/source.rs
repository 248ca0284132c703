//! Where listing pages come from.

use async_trait::async_trait;
use tracing::debug;

use super::token::ContinuationToken;
use crate::repository::{RepositoryClient, RepositoryError};

/// Fetches the raw body of the listing page identified by a token.
///
/// Implemented by [`RepositoryClient`]; tests substitute in-memory sources.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches one listing page. The sentinel selects the first page.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError`] when the request fails.
    async fn fetch_listing(&self, token: &ContinuationToken) -> Result<Vec<u8>, RepositoryError>;
}

#[async_trait]
impl ListingSource for RepositoryClient {
    async fn fetch_listing(&self, token: &ContinuationToken) -> Result<Vec<u8>, RepositoryError> {
        let url = self.target().assets_url(token.as_query_value())?;
        debug!(url = %url, token = %token, "fetching listing page");
        self.fetch(url.as_str()).await
    }
}
