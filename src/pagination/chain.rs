//! Materializes the full cursor chain of a repository listing.

use std::collections::HashSet;

use tracing::{debug, info, instrument};

use super::error::PaginationError;
use super::resolver::resolve_next;
use super::source::ListingSource;
use super::token::ContinuationToken;

/// The tokens needed to request every listing page, in fetch order.
///
/// Always starts with the sentinel (page 1); element `n` requests page `n + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorChain {
    tokens: Vec<ContinuationToken>,
}

impl CursorChain {
    /// The tokens, first page first.
    #[must_use]
    pub fn tokens(&self) -> &[ContinuationToken] {
        &self.tokens
    }

    /// Number of listing pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// A built chain always holds at least the starting sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterates the tokens in fetch order.
    pub fn iter(&self) -> std::slice::Iter<'_, ContinuationToken> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a CursorChain {
    type Item = &'a ContinuationToken;
    type IntoIter = std::slice::Iter<'a, ContinuationToken>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Resolves tokens from the sentinel until the service hands the sentinel back.
///
/// Runs as a loop, so the number of pages is bounded only by memory. Any
/// failed step aborts the whole build.
///
/// # Errors
///
/// Propagates every [`resolve_next`] error, and returns
/// [`PaginationError::CursorCycle`] if the service repeats a token.
#[instrument(level = "debug", skip(source))]
pub async fn build_chain<S>(source: &S) -> Result<CursorChain, PaginationError>
where
    S: ListingSource + ?Sized,
{
    let mut tokens = vec![ContinuationToken::Sentinel];
    let mut seen: HashSet<ContinuationToken> = HashSet::new();
    let mut current = ContinuationToken::Sentinel;

    loop {
        let next = resolve_next(source, &current).await?;
        if next.is_sentinel() {
            break;
        }
        if !seen.insert(next.clone()) {
            return Err(PaginationError::CursorCycle {
                token: next.to_string(),
            });
        }
        debug!(page = tokens.len() + 1, token = %next, "discovered listing page");
        tokens.push(next.clone());
        current = next;
    }

    info!(pages = tokens.len(), "cursor chain resolved");
    Ok(CursorChain { tokens })
}
