//! Sequential fetch-and-archive pipeline.
//!
//! Fetches each asset of a snapshot one at a time, packs the successes
//! into a zip, reports progress over a channel, and supports
//! cancellation.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use chrono::Utc;
use skowt_archive::{ArchiveBuilder, BALANCED_LEVEL, archive_filename};
use skowt_protocol::{AssetRef, DownloadProgress, DownloadStatus};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::MassDownloadError;
use crate::fetcher::AssetFetcher;
use crate::sink::ArchiveSink;
use crate::types::{ArchiveReport, FailedAsset};

/// Counters shared between the run and its error path.
#[derive(Debug, Default)]
struct RunCounters {
    processed: usize,
    succeeded: usize,
}

/// Turns a selection snapshot into one saved archive.
///
/// Progress events are delivered in order on the channel returned by
/// [`take_events`](Self::take_events). Sending never blocks the run.
pub struct MassDownloadOrchestrator {
    fetcher: Arc<dyn AssetFetcher>,
    sink: Arc<dyn ArchiveSink>,
    level: i64,
    events_tx: mpsc::UnboundedSender<DownloadProgress>,
    events_rx: Option<mpsc::UnboundedReceiver<DownloadProgress>>,
    cancel: Mutex<CancellationToken>,
}

impl MassDownloadOrchestrator {
    /// Creates an orchestrator using the balanced compression level.
    pub fn new(fetcher: Arc<dyn AssetFetcher>, sink: Arc<dyn ArchiveSink>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            fetcher,
            sink,
            level: BALANCED_LEVEL,
            events_tx,
            events_rx: Some(events_rx),
            cancel: Mutex::new(CancellationToken::new()),
        }
    }

    /// Overrides the Deflate level (0-9).
    pub fn with_level(mut self, level: i64) -> Self {
        self.level = level.clamp(0, 9);
        self
    }

    /// Takes the progress receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<DownloadProgress>> {
        self.events_rx.take()
    }

    /// Returns the token that cancels the active run, or the next one if
    /// none is active. A run that ends cancelled installs a fresh token,
    /// so later runs are unaffected.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Fetches, archives and saves `assets`.
    ///
    /// Fails fast with [`MassDownloadError::EmptySelection`] (no fetches,
    /// no events) when `assets` is empty. Individual fetch failures are
    /// skipped; the run fails with [`MassDownloadError::AllDownloadsFailed`]
    /// only if nothing was fetched. Every failure after the precondition
    /// emits an `error` progress event before returning.
    pub async fn archive(&self, assets: Vec<AssetRef>) -> Result<ArchiveReport, MassDownloadError> {
        if assets.is_empty() {
            return Err(MassDownloadError::EmptySelection);
        }

        let total = assets.len();
        let started = Instant::now();
        let mut counters = RunCounters::default();
        let cancel = self.cancel_token();
        info!(total, "mass download started");

        match self.run(&assets, &cancel, &mut counters).await {
            Ok(report) => {
                info!(
                    total,
                    included = report.included.len(),
                    failed = report.failed.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "mass download completed"
                );
                Ok(report)
            }
            Err(e) => {
                self.emit(DownloadProgress {
                    current: counters.processed,
                    total,
                    succeeded: counters.succeeded,
                    current_asset: String::new(),
                    status: DownloadStatus::Error,
                });
                error!(total, processed = counters.processed, error = %e, "mass download failed");
                if cancel.is_cancelled() {
                    *self.cancel.lock().unwrap_or_else(PoisonError::into_inner) = CancellationToken::new();
                }
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        assets: &[AssetRef],
        cancel: &CancellationToken,
        counters: &mut RunCounters,
    ) -> Result<ArchiveReport, MassDownloadError> {
        let total = assets.len();
        let mut builder = ArchiveBuilder::new();
        let mut included = Vec::with_capacity(total);
        let mut failed = Vec::new();

        for asset in assets {
            check_cancelled(cancel)?;

            self.emit(DownloadProgress {
                current: counters.processed,
                total,
                succeeded: counters.succeeded,
                current_asset: asset.name.clone(),
                status: DownloadStatus::Downloading,
            });

            let result = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(MassDownloadError::Cancelled),
                result = self.fetcher.fetch(asset) => result,
            };
            counters.processed += 1;

            match result {
                Ok(data) => {
                    let bytes = data.len();
                    let path = builder.add(asset, data);
                    included.push(asset.id.clone());
                    counters.succeeded += 1;
                    debug!(asset = %asset.id, path = %path, bytes, "asset added to archive");
                }
                Err(e) => {
                    warn!(asset = %asset.id, name = %asset.name, error = %e, "asset download failed, skipping");
                    failed.push(FailedAsset {
                        id: asset.id.clone(),
                        name: asset.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        if counters.succeeded == 0 {
            return Err(MassDownloadError::AllDownloadsFailed { attempted: total });
        }
        check_cancelled(cancel)?;

        self.emit(DownloadProgress {
            current: counters.processed,
            total,
            succeeded: counters.succeeded,
            current_asset: String::new(),
            status: DownloadStatus::Archiving,
        });

        let level = self.level;
        let data = tokio::task::spawn_blocking(move || builder.build(level))
            .await
            .map_err(|e| MassDownloadError::ArchiveFailed(format!("archive task failed: {e}")))??;
        let archive_bytes = data.len();

        let filename = archive_filename(Utc::now());
        let location = self.sink.save(&filename, data).await?;

        self.emit(DownloadProgress {
            current: counters.processed,
            total,
            succeeded: counters.succeeded,
            current_asset: String::new(),
            status: DownloadStatus::Complete,
        });

        Ok(ArchiveReport {
            total,
            included,
            failed,
            filename,
            location,
            archive_bytes,
        })
    }

    fn emit(&self, progress: DownloadProgress) {
        // Receiver may have been dropped by the UI; progress is advisory.
        let _ = self.events_tx.send(progress);
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), MassDownloadError> {
    if cancel.is_cancelled() {
        Err(MassDownloadError::Cancelled)
    } else {
        Ok(())
    }
}
