//! Collects artifact download URLs across every page of a cursor chain.

use tracing::{debug, info, instrument};

use super::chain::CursorChain;
use super::error::PaginationError;
use super::listing::ListingPage;
use super::source::ListingSource;
use crate::progress::{BackupEvent, BackupObserver};

/// Refetches every page of `chain` and concatenates its `items[].downloadUrl`
/// values, keeping page order and order within each page.
///
/// Aggregation only runs when the chain has more than one page. A chain of
/// length one (a single-page or empty repository) yields no URLs, even if that
/// page lists items.
///
/// # Errors
///
/// Returns [`PaginationError::PageFetch`] or [`PaginationError::FieldExtraction`]
/// for the first page that fails; no partial list is returned.
#[instrument(level = "debug", skip_all, fields(pages = chain.len()))]
pub async fn collect_artifact_urls<S>(
    source: &S,
    chain: &CursorChain,
    observer: &dyn BackupObserver,
) -> Result<Vec<String>, PaginationError>
where
    S: ListingSource + ?Sized,
{
    let total = chain.len();
    if total <= 1 {
        info!(
            pages = total,
            "single listing page, skipping download URL aggregation"
        );
        return Ok(Vec::new());
    }

    let mut urls = Vec::new();
    for (index, token) in chain.iter().enumerate() {
        let page = index + 1;
        debug!(page, token = %token, "collecting download URLs");

        let body = source
            .fetch_listing(token)
            .await
            .map_err(|source| PaginationError::PageFetch { page, source })?;
        let listing = ListingPage::parse(&body).map_err(|e| {
            PaginationError::field_extraction(page, format!("listing body is not valid JSON: {e}"))
        })?;
        let page_urls = listing.download_urls(page)?;

        observer.on_event(&BackupEvent::PageCollected {
            page,
            total,
            urls: page_urls.len(),
        });
        urls.extend(page_urls);
    }

    info!(pages = total, urls = urls.len(), "download URLs assembled");
    Ok(urls)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pagination::build_chain;
    use crate::pagination::test_support::ScriptedSource;
    use crate::progress::NoopObserver;
    use std::sync::Mutex;

    const X: &str = "0123456789abcdef0123456789abcdef";
    const Y: &str = "fedcba9876543210fedcba9876543210";

    #[tokio::test]
    async fn test_collect_concatenates_pages_in_order() {
        let source = ScriptedSource::new()
            .page("null", &["u1", "u2"], X)
            .page(X, &["u3"], Y)
            .page(Y, &["u4", "u5"], "null");
        let chain = build_chain(&source).await.unwrap();

        let urls = collect_artifact_urls(&source, &chain, &NoopObserver)
            .await
            .unwrap();

        assert_eq!(urls, vec!["u1", "u2", "u3", "u4", "u5"]);
    }

    #[tokio::test]
    async fn test_collect_single_page_returns_nothing_even_with_items() {
        let source = ScriptedSource::new().page("null", &["u1", "u2"], "null");
        let chain = build_chain(&source).await.unwrap();
        assert_eq!(chain.len(), 1);

        let urls = collect_artifact_urls(&source, &chain, &NoopObserver)
            .await
            .unwrap();

        assert!(urls.is_empty());
        // Only the chain-building request; aggregation never refetches.
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_collect_reports_each_page() {
        let source = ScriptedSource::new()
            .page("null", &["u1"], X)
            .page(X, &[], "null");
        let chain = build_chain(&source).await.unwrap();

        let events = Mutex::new(Vec::new());
        let observer = |event: &BackupEvent<'_>| {
            if let BackupEvent::PageCollected { page, total, urls } = event {
                events.lock().unwrap().push((*page, *total, *urls));
            }
        };
        collect_artifact_urls(&source, &chain, &observer)
            .await
            .unwrap();

        assert_eq!(*events.lock().unwrap(), vec![(1, 2, 1), (2, 2, 0)]);
    }

    #[tokio::test]
    async fn test_collect_page_failure_aborts_with_page_number() {
        let source = ScriptedSource::new()
            .page("null", &["u1"], X)
            .page(X, &["u2"], "null");
        let chain = build_chain(&source).await.unwrap();
        source.forget(X);

        let result = collect_artifact_urls(&source, &chain, &NoopObserver).await;
        assert!(matches!(
            result,
            Err(PaginationError::PageFetch { page: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_collect_malformed_page_is_field_extraction_error() {
        let source = ScriptedSource::new()
            .page("null", &["u1"], X)
            .raw(X, br#"{"continuationToken":null,"items":{"oops":true}}"#);
        let chain = build_chain(&source).await.unwrap();

        let result = collect_artifact_urls(&source, &chain, &NoopObserver).await;
        assert!(matches!(
            result,
            Err(PaginationError::FieldExtraction { page: 2, .. })
        ));
    }
}
