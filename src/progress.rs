//! Progress reporting hooks for a backup run.
//!
//! The core never draws anything; it emits [`BackupEvent`]s to a
//! [`BackupObserver`] at fixed points and callers decide how to display them.

use std::error::Error;
use std::path::Path;

/// Something that happened during a backup run.
#[derive(Debug)]
pub enum BackupEvent<'a> {
    /// The cursor chain is known; `pages` listing pages will be aggregated.
    ChainResolved {
        /// Number of listing pages.
        pages: usize,
    },
    /// One listing page was refetched and its URLs extracted.
    PageCollected {
        /// 1-based page number.
        page: usize,
        /// Total pages in the chain.
        total: usize,
        /// URLs found on this page.
        urls: usize,
    },
    /// Aggregation finished with `total` artifact URLs.
    ArtifactsDiscovered {
        /// Number of artifacts to download.
        total: usize,
    },
    /// An artifact was written to disk.
    ArtifactSaved {
        /// The download URL.
        url: &'a str,
        /// Where the artifact was written.
        path: &'a Path,
        /// Bytes written.
        bytes: u64,
    },
    /// An artifact could not be resolved or downloaded.
    ArtifactFailed {
        /// The download URL.
        url: &'a str,
        /// What went wrong.
        error: &'a (dyn Error + 'static),
    },
}

/// Receives [`BackupEvent`]s. Implementations must be cheap; they run inline.
pub trait BackupObserver: Send + Sync {
    /// Handles one event.
    fn on_event(&self, event: &BackupEvent<'_>);
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BackupObserver for NoopObserver {
    fn on_event(&self, _event: &BackupEvent<'_>) {}
}

impl<F> BackupObserver for F
where
    F: Fn(&BackupEvent<'_>) + Send + Sync,
{
    fn on_event(&self, event: &BackupEvent<'_>) {
        self(event);
    }
}
