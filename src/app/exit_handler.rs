//! Exit code logic for the send command.
//!
//! Single responsibility: map a send run's outcome to the process exit.

use crate::ProcessExit;
use crate::app::send_orchestrator::SendSummary;

/// A run that stopped early fails; a run that reached the end succeeds, even
/// when books were skipped under `--ignore-errors` or for their size.
pub(crate) fn determine_exit_outcome(summary: &SendSummary) -> ProcessExit {
    if summary.stopped.is_some() {
        ProcessExit::Failure
    } else {
        ProcessExit::Success
    }
}
