//! Maps backup statistics to the process exit outcome.

use crate::ProcessExit;

/// Determines the exit outcome from saved and failed artifact counts.
pub(crate) fn determine_exit_outcome(downloaded: usize, failed: usize) -> ProcessExit {
    if failed == 0 {
        ProcessExit::Success
    } else if downloaded > 0 {
        ProcessExit::Partial
    } else {
        ProcessExit::Failure
    }
}
