//! Progress bars for backup runs.

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use nexus_backup::{BackupEvent, BackupObserver};

const PAGES_TEMPLATE: &str = "{spinner} Assembling download URLs [{bar:30}] {pos}/{len} pages";
const ARTIFACTS_TEMPLATE: &str = "{spinner} Backing up [{bar:30}] {pos}/{len} {wide_msg}";

/// Draws one bar while listing pages are aggregated and one while artifacts download.
///
/// When disabled every bar is hidden, so events are still tracked but nothing is drawn.
pub(crate) struct ProgressReporter {
    enabled: bool,
    pages: Mutex<Option<ProgressBar>>,
    artifacts: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            enabled,
            pages: Mutex::new(None),
            artifacts: Mutex::new(None),
        }
    }

    /// Clears any bar still on screen.
    pub(crate) fn finish(&self) {
        for slot in [&self.pages, &self.artifacts] {
            if let Ok(mut guard) = slot.lock()
                && let Some(bar) = guard.take()
            {
                bar.finish_and_clear();
            }
        }
    }

    fn new_bar(&self, len: usize, template: &str) -> ProgressBar {
        let len = u64::try_from(len).unwrap_or(u64::MAX);
        if !self.enabled {
            return ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::hidden());
        }
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::with_template(template)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bar
    }

    fn with_bar(slot: &Mutex<Option<ProgressBar>>, apply: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = slot.lock()
            && let Some(bar) = guard.as_ref()
        {
            apply(bar);
        }
    }

    fn replace_bar(slot: &Mutex<Option<ProgressBar>>, bar: ProgressBar) {
        if let Ok(mut guard) = slot.lock()
            && let Some(previous) = guard.replace(bar)
        {
            previous.finish_and_clear();
        }
    }

    #[cfg(test)]
    fn positions(&self) -> (Option<u64>, Option<u64>) {
        let read = |slot: &Mutex<Option<ProgressBar>>| {
            slot.lock()
                .ok()
                .and_then(|guard| guard.as_ref().map(ProgressBar::position))
        };
        (read(&self.pages), read(&self.artifacts))
    }
}

impl BackupObserver for ProgressReporter {
    fn on_event(&self, event: &BackupEvent<'_>) {
        match event {
            BackupEvent::ChainResolved { pages } => {
                if *pages > 1 {
                    let bar = self.new_bar(*pages, PAGES_TEMPLATE);
                    Self::replace_bar(&self.pages, bar);
                }
            }
            BackupEvent::PageCollected { .. } => {
                Self::with_bar(&self.pages, |bar| bar.inc(1));
            }
            BackupEvent::ArtifactsDiscovered { total } => {
                Self::with_bar(&self.pages, ProgressBar::finish_and_clear);
                if *total > 0 {
                    let bar = self.new_bar(*total, ARTIFACTS_TEMPLATE);
                    Self::replace_bar(&self.artifacts, bar);
                }
            }
            BackupEvent::ArtifactSaved { path, .. } => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                Self::with_bar(&self.artifacts, |bar| {
                    bar.set_message(name);
                    bar.inc(1);
                });
            }
            BackupEvent::ArtifactFailed { .. } => {
                Self::with_bar(&self.artifacts, |bar| bar.inc(1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::Path;

    #[test]
    fn test_hidden_reporter_tracks_pages_and_artifacts() {
        let reporter = ProgressReporter::new(false);
        reporter.on_event(&BackupEvent::ChainResolved { pages: 3 });
        for page in 1..=3 {
            reporter.on_event(&BackupEvent::PageCollected {
                page,
                total: 3,
                urls: 2,
            });
        }
        assert_eq!(reporter.positions(), (Some(3), None));

        reporter.on_event(&BackupEvent::ArtifactsDiscovered { total: 6 });
        reporter.on_event(&BackupEvent::ArtifactSaved {
            url: "http://n/repository/r/a.jar",
            path: Path::new("download/r/a.jar"),
            bytes: 10,
        });
        let error = io::Error::other("boom");
        reporter.on_event(&BackupEvent::ArtifactFailed {
            url: "http://n/repository/r/b.jar",
            error: &error,
        });

        assert_eq!(reporter.positions().1, Some(2));
        reporter.finish();
        assert_eq!(reporter.positions(), (None, None));
    }

    #[test]
    fn test_single_page_chain_creates_no_bars() {
        let reporter = ProgressReporter::new(false);
        reporter.on_event(&BackupEvent::ChainResolved { pages: 1 });
        reporter.on_event(&BackupEvent::ArtifactsDiscovered { total: 0 });
        assert_eq!(reporter.positions(), (None, None));
    }
}
