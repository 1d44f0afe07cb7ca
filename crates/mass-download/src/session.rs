//! A mass download run bound to the shared selection store.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skowt_selection::SelectionStore;
use tracing::{info, warn};

use crate::error::MassDownloadError;
use crate::pipeline::MassDownloadOrchestrator;
use crate::types::ArchiveReport;

/// Selection store shared between the UI and the download session.
pub type SharedSelection = Arc<Mutex<SelectionStore>>;

/// Records a finished bulk download on the server.
pub trait HistoryRecorder: Send + Sync {
    /// Stores the ids of the downloaded assets and returns the history id.
    fn record<'a>(
        &'a self,
        asset_ids: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<String, MassDownloadError>> + Send + 'a>>;
}

/// What a successful session produced.
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub report: ArchiveReport,
    /// Server history id, when recording succeeded.
    pub history_id: Option<String>,
}

fn lock(store: &SharedSelection) -> MutexGuard<'_, SelectionStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lowers the run flag when the session ends, however it ends.
struct RunFlag<'a> {
    store: &'a SharedSelection,
}

impl Drop for RunFlag<'_> {
    fn drop(&mut self) {
        lock(self.store).set_mass_downloading(false);
    }
}

/// Runs the orchestrator over the current selection.
///
/// Only one run can be active per store. While it runs the selection is
/// frozen; on success it is cleared and the download is recorded.
pub struct MassDownloadSession {
    store: SharedSelection,
    orchestrator: MassDownloadOrchestrator,
    history: Option<Arc<dyn HistoryRecorder>>,
}

impl MassDownloadSession {
    pub fn new(store: SharedSelection, orchestrator: MassDownloadOrchestrator) -> Self {
        Self {
            store,
            orchestrator,
            history: None,
        }
    }

    /// Records successful runs through `recorder`.
    pub fn with_history(mut self, recorder: Arc<dyn HistoryRecorder>) -> Self {
        self.history = Some(recorder);
        self
    }

    pub fn orchestrator(&self) -> &MassDownloadOrchestrator {
        &self.orchestrator
    }

    pub async fn run(&self) -> Result<SessionOutcome, MassDownloadError> {
        let snapshot = {
            let mut store = lock(&self.store);
            if store.is_mass_downloading() {
                return Err(MassDownloadError::AlreadyRunning);
            }
            if store.is_empty() {
                return Err(MassDownloadError::EmptySelection);
            }
            let snapshot = store.snapshot();
            store.set_mass_downloading(true);
            snapshot
        };
        let _flag = RunFlag { store: &self.store };

        let report = self.orchestrator.archive(snapshot).await?;
        lock(&self.store).clear();

        let history_id = match &self.history {
            Some(recorder) => match recorder.record(&report.included).await {
                Ok(id) => {
                    info!(history = %id, assets = report.included.len(), "download recorded");
                    Some(id)
                }
                Err(e) => {
                    warn!(error = %e, "failed to record download history");
                    None
                }
            },
            None => None,
        };

        Ok(SessionOutcome { report, history_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::AssetFetcher;
    use crate::pipeline::tests::{MockFetcher, RecordingSink};
    use skowt_protocol::{Asset, AssetRef, Uploader};
    use skowt_selection::ToggleOutcome;
    use std::sync::atomic::{AtomicBool, Ordering};

    fn asset(id: &str) -> Asset {
        Asset {
            id: id.into(),
            name: format!("asset {id}"),
            game_id: "g1".into(),
            game_name: "Honkai: Star Rail".into(),
            game_slug: "hsr".into(),
            category_id: "c1".into(),
            category_name: "Characters".into(),
            category_slug: "characters".into(),
            download_count: 0,
            view_count: 0,
            size: 512,
            extension: "png".into(),
            created_at: String::new(),
            is_suggestive: false,
            tags: vec![],
            uploaded_by: Uploader::default(),
        }
    }

    fn shared(ids: &[&str]) -> SharedSelection {
        let mut store = SelectionStore::new();
        for id in ids {
            store.toggle(asset(id));
        }
        Arc::new(Mutex::new(store))
    }

    /// Checks the store from inside a fetch.
    struct StoreCheckingFetcher {
        store: SharedSelection,
        saw_flag: AtomicBool,
        toggle_frozen: AtomicBool,
    }

    impl AssetFetcher for StoreCheckingFetcher {
        fn fetch<'a>(
            &'a self,
            target: &'a AssetRef,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, MassDownloadError>> + Send + 'a>>
        {
            Box::pin(async move {
                let mut store = lock(&self.store);
                if store.is_mass_downloading() {
                    self.saw_flag.store(true, Ordering::SeqCst);
                }
                if store.toggle(asset("late")) == ToggleOutcome::Frozen {
                    self.toggle_frozen.store(true, Ordering::SeqCst);
                }
                Ok(target.id.as_bytes().to_vec())
            })
        }
    }

    struct StaticRecorder(Result<&'static str, &'static str>);

    impl HistoryRecorder for StaticRecorder {
        fn record<'a>(
            &'a self,
            _asset_ids: &'a [String],
        ) -> Pin<Box<dyn Future<Output = Result<String, MassDownloadError>> + Send + 'a>> {
            let result = self
                .0
                .map(str::to_string)
                .map_err(|e| MassDownloadError::History(e.into()));
            Box::pin(async move { result })
        }
    }

    #[tokio::test]
    async fn selection_is_frozen_during_run_and_cleared_after() {
        let store = shared(&["a", "b", "c"]);
        let fetcher = Arc::new(StoreCheckingFetcher {
            store: store.clone(),
            saw_flag: AtomicBool::new(false),
            toggle_frozen: AtomicBool::new(false),
        });
        let sink = Arc::new(RecordingSink::default());
        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(fetcher.clone(), sink.clone()),
        )
        .with_history(Arc::new(StaticRecorder(Ok("h1"))));

        let outcome = session.run().await.unwrap();
        assert_eq!(outcome.report.included, vec!["a", "b", "c"]);
        assert_eq!(outcome.history_id.as_deref(), Some("h1"));

        assert!(fetcher.saw_flag.load(Ordering::SeqCst));
        assert!(fetcher.toggle_frozen.load(Ordering::SeqCst));

        let store = lock(&store);
        assert!(!store.is_mass_downloading());
        assert!(store.is_empty());
        assert_eq!(sink.saved.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn failed_run_keeps_selection_and_lowers_flag() {
        let store = shared(&["a", "b"]);
        let fetcher = Arc::new(MockFetcher::failing(&["a", "b"]));
        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(fetcher, Arc::new(RecordingSink::default())),
        );

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, MassDownloadError::AllDownloadsFailed { attempted: 2 }));

        let store = lock(&store);
        assert!(!store.is_mass_downloading());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn empty_selection_does_not_raise_flag() {
        let store = shared(&[]);
        let fetcher = Arc::new(MockFetcher::default());
        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(fetcher.clone(), Arc::new(RecordingSink::default())),
        );

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, MassDownloadError::EmptySelection));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert!(!lock(&store).is_mass_downloading());
    }

    #[tokio::test]
    async fn second_run_is_rejected_while_flag_is_up() {
        let store = shared(&["a"]);
        lock(&store).set_mass_downloading(true);

        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(
                Arc::new(MockFetcher::default()),
                Arc::new(RecordingSink::default()),
            ),
        );

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, MassDownloadError::AlreadyRunning));
        // The other run owns the flag.
        assert!(lock(&store).is_mass_downloading());
        assert_eq!(lock(&store).len(), 1);
    }

    #[tokio::test]
    async fn history_failure_does_not_fail_run() {
        let store = shared(&["a"]);
        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(
                Arc::new(MockFetcher::default()),
                Arc::new(RecordingSink::default()),
            ),
        )
        .with_history(Arc::new(StaticRecorder(Err("unauthorized"))));

        let outcome = session.run().await.unwrap();
        assert!(outcome.history_id.is_none());
        assert!(lock(&store).is_empty());
    }

    #[tokio::test]
    async fn cancelled_run_lowers_flag() {
        let store = shared(&["a", "b"]);
        let session = MassDownloadSession::new(
            store.clone(),
            MassDownloadOrchestrator::new(
                Arc::new(MockFetcher::default()),
                Arc::new(RecordingSink::default()),
            ),
        );
        session.orchestrator().cancel_token().cancel();

        let err = session.run().await.unwrap_err();
        assert!(matches!(err, MassDownloadError::Cancelled));
        let store = lock(&store);
        assert!(!store.is_mass_downloading());
        assert_eq!(store.len(), 2);
    }
}
