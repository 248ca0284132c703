//! One step of cursor resolution: current token in, next token out.

use tracing::debug;

use super::error::PaginationError;
use super::listing::ListingPage;
use super::source::ListingSource;
use super::token::ContinuationToken;

/// Fetches the page identified by `current` and returns the token of the page after it.
///
/// The token format is checked before any request is made. The sentinel
/// fetches the first page; a returned sentinel means there is no next page.
///
/// # Errors
///
/// - [`PaginationError::InvalidTokenFormat`] when `current` is malformed (no request is sent)
/// - [`PaginationError::Repository`] when the request fails
/// - [`PaginationError::TokenExtraction`] when the body is not JSON or lacks `continuationToken`
pub async fn resolve_next<S>(
    source: &S,
    current: &ContinuationToken,
) -> Result<ContinuationToken, PaginationError>
where
    S: ListingSource + ?Sized,
{
    current.validate()?;

    let body = source.fetch_listing(current).await?;
    let page = ListingPage::parse(&body).map_err(|e| {
        PaginationError::token_extraction(format!("listing body is not valid JSON: {e}"))
    })?;
    let next = page.continuation_token()?;

    debug!(current = %current, next = %next, "resolved continuation token");
    Ok(next)
}
