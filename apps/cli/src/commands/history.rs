//! Download history: list past bulk downloads and reselect one.

use anyhow::bail;
use skowt_notifications::{notify_frozen, notify_reselect};
use skowt_protocol::{DownloadHistoryEntry, DownloadHistoryResponse};
use tracing::debug;

use super::format_size;
use crate::state::AppState;

/// Page size used while searching for a history entry.
const SEARCH_PAGE_SIZE: u32 = 50;

pub async fn list(state: &mut AppState, page: u32, limit: u32) -> anyhow::Result<()> {
    let api = state.api()?;
    if !api.is_authenticated() {
        bail!("download history requires a session token (set session_token in the config)");
    }

    let history = api.download_history(page.max(1), limit.clamp(1, 100)).await?;
    for line in render_history(&history) {
        println!("{line}");
    }
    Ok(())
}

pub async fn reselect(state: &mut AppState, history_id: &str) -> anyhow::Result<()> {
    if state.is_frozen() {
        notify_frozen(&mut state.toasts);
        state.flush_toasts();
        return Ok(());
    }

    let api = state.api()?;
    if !api.is_authenticated() {
        bail!("download history requires a session token (set session_token in the config)");
    }

    let mut page = 1;
    let entry = loop {
        let history = api.download_history(page, SEARCH_PAGE_SIZE).await?;
        if let Some(entry) = find_entry(history.download_history, history_id) {
            break entry;
        }
        if !history.pagination.has_next {
            bail!("no download with id {history_id}");
        }
        page += 1;
        debug!(page, "history entry not on previous page");
    };

    let outcome = state.store().set_selection(entry.assets);
    state.persist()?;
    notify_reselect(&mut state.toasts, outcome);
    state.flush_toasts();
    Ok(())
}

fn find_entry(entries: Vec<DownloadHistoryEntry>, history_id: &str) -> Option<DownloadHistoryEntry> {
    entries.into_iter().find(|e| e.history_id == history_id)
}

fn render_history(history: &DownloadHistoryResponse) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in &history.download_history {
        let size: u64 = entry.assets.iter().map(|a| a.size).sum();
        lines.push(format!(
            "{}  {}  {} assets  {}",
            entry.history_id,
            entry.downloaded_at,
            entry.assets.len(),
            format_size(size)
        ));
    }
    let p = &history.pagination;
    lines.push(format!("page {}/{} ({} downloads)", p.page, p.total_pages.max(1), p.total));
    lines
}
