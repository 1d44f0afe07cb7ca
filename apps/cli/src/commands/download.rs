//! `download`: fetch the selection and save it as one zip.

use std::path::PathBuf;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use skowt_bridge::BridgeClient;
use skowt_mass_download::{
    DirectorySink, MassDownloadError, MassDownloadOrchestrator, MassDownloadSession,
};
use skowt_notifications::notify_download;
use skowt_protocol::{DownloadProgress, DownloadStatus};
use skowt_selection::PersistenceError;
use tokio::sync::mpsc;

use super::format_size;
use crate::adapters::{ApiHistoryRecorder, BridgeFetcher};
use crate::state::AppState;

pub async fn run(state: &mut AppState, out: Option<PathBuf>) -> anyhow::Result<()> {
    match state.begin_run() {
        Ok(()) => {}
        Err(PersistenceError::Locked(path)) => {
            tracing::debug!(lock = %path.display(), "run lock held elsewhere");
            notify_download(&mut state.toasts, &Err(MassDownloadError::AlreadyRunning));
            state.flush_toasts();
            return Err(MassDownloadError::AlreadyRunning.into());
        }
        Err(e) => return Err(e.into()),
    }

    let total = state.store().len();
    let out_dir = state.config.output_dir(out);

    let fetcher = BridgeFetcher::new(BridgeClient::new(state.config.bridge_config())?);
    let sink = DirectorySink::new(&out_dir);
    let mut orchestrator = MassDownloadOrchestrator::new(Arc::new(fetcher), Arc::new(sink))
        .with_level(state.config.compression_level);
    let events_rx = orchestrator.take_events();

    let mut session = MassDownloadSession::new(state.selection.clone(), orchestrator);
    if state.config.token().is_some() {
        session = session.with_history(Arc::new(ApiHistoryRecorder::new(state.api()?)));
    }
    let cancel = session.orchestrator().cancel_token();

    let bar = progress_bar(total);
    let forwarder = events_rx.map(|rx| tokio::spawn(render_progress(rx, bar.clone())));

    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling download");
            cancel.cancel();
        }
    });

    let result = session.run().await;
    interrupt.abort();

    // Dropping the session closes the event channel so the renderer can finish.
    drop(session);
    if let Some(handle) = forwarder {
        let _ = handle.await;
    }

    state.finish_run(result.is_ok())?;
    notify_download(&mut state.toasts, &result);

    match &result {
        Ok(outcome) => {
            let report = &outcome.report;
            println!(
                "{} ({}, {}/{} assets)",
                report.location,
                format_size(report.archive_bytes as u64),
                report.included.len(),
                report.total
            );
            for failed in &report.failed {
                eprintln!("  skipped {} ({}): {}", failed.name, failed.id, failed.reason);
            }
        }
        Err(e) => tracing::debug!(error = %e, "download finished without archive"),
    }
    state.flush_toasts();

    match result {
        Ok(_) | Err(MassDownloadError::EmptySelection) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    ) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

async fn render_progress(mut rx: mpsc::UnboundedReceiver<DownloadProgress>, bar: ProgressBar) {
    while let Some(progress) = rx.recv().await {
        bar.set_length(progress.total as u64);
        bar.set_position(progress.current as u64);
        bar.set_message(progress.status_text());
        match progress.status {
            DownloadStatus::Complete => bar.finish_with_message(progress.status_text()),
            DownloadStatus::Error => bar.abandon_with_message(progress.status_text()),
            DownloadStatus::Downloading | DownloadStatus::Archiving => {}
        }
    }
    if !bar.is_finished() {
        bar.finish_and_clear();
    }
}
