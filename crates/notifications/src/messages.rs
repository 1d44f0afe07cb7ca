use skowt_mass_download::{MassDownloadError, SessionOutcome};
use skowt_protocol::MAX_SELECTION;
use skowt_selection::{LimitState, SetSelectionOutcome, ToggleOutcome};
use tracing::debug;

use crate::toast::ToastQueue;

/// Queues the toast for a selection toggle, if it warrants one.
///
/// `limit` is the store's limit state after the toggle.
pub fn notify_toggle(queue: &mut ToastQueue, outcome: ToggleOutcome, limit: LimitState) -> Option<u64> {
    match outcome {
        ToggleOutcome::LimitReached => Some(queue.error_with(
            format!("Selection limit reached ({MAX_SELECTION})"),
            format!("You can only select up to {MAX_SELECTION} assets at once to prevent instability."),
        )),
        ToggleOutcome::Frozen => Some(notify_frozen(queue)),
        ToggleOutcome::Added if limit == LimitState::Approaching => {
            Some(queue.warning("Approaching the selection limit"))
        }
        ToggleOutcome::Added | ToggleOutcome::Removed => None,
    }
}

/// Queues the warning shown when an edit is refused during a download.
pub fn notify_frozen(queue: &mut ToastQueue) -> u64 {
    queue.warning("Selection is locked while a download is running")
}

/// Queues the toast for a finished bulk download.
pub fn notify_download(
    queue: &mut ToastQueue,
    result: &Result<SessionOutcome, MassDownloadError>,
) -> u64 {
    match result {
        Ok(outcome) => {
            let report = &outcome.report;
            let id = queue.success(format!(
                "Successfully downloaded {} assets!",
                report.included.len()
            ));
            if report.is_partial() {
                queue.warning_with(
                    format!("{} assets could not be downloaded", report.failed.len()),
                    "They were left out of the archive.",
                );
            }
            id
        }
        Err(MassDownloadError::EmptySelection) => queue.warning("No assets selected"),
        Err(MassDownloadError::AlreadyRunning) => queue.warning("A download is already in progress"),
        Err(MassDownloadError::Cancelled) => queue.info("Download cancelled"),
        Err(e) => {
            debug!(error = %e, "download failure shown to user");
            queue.error("Failed to download assets. Please try again.")
        }
    }
}

/// Queues the toast for replacing the selection with a past download.
pub fn notify_reselect(queue: &mut ToastQueue, outcome: SetSelectionOutcome) -> u64 {
    if outcome.kept == 0 {
        return queue.warning("Nothing to reselect");
    }
    let id = queue.success_with(
        format!("Reselected {} assets for download", outcome.kept),
        "Run `download` to fetch them again.",
    );
    if outcome.dropped > 0 {
        queue.warning(format!("{} assets were skipped", outcome.dropped));
    }
    id
}
