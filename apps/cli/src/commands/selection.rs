//! Selection commands: select, list, clear, mode.

use skowt_notifications::{notify_frozen, notify_toggle};
use skowt_protocol::{MAX_SELECTION, SelectionMode};
use skowt_selection::{LimitState, SelectionStore};
use tracing::warn;

use super::format_size;
use crate::state::AppState;

pub async fn select(state: &mut AppState, ids: &[String]) -> anyhow::Result<()> {
    if state.is_frozen() {
        notify_frozen(&mut state.toasts);
        state.flush_toasts();
        return Ok(());
    }

    let api = state.api()?;
    let mut changed = false;

    for id in ids {
        let asset = match api.get_asset(id).await {
            Ok(asset) => asset,
            Err(e) => {
                warn!(asset = %id, error = %e, "asset lookup failed");
                state.toasts.error_with(format!("Could not find asset {id}"), e.to_string());
                continue;
            }
        };

        let (outcome, limit) = {
            let mut store = state.store();
            let outcome = store.toggle(asset);
            (outcome, store.limit_state())
        };
        notify_toggle(&mut state.toasts, outcome, limit);
        if outcome.changed() {
            changed = true;
            println!("{:>8} {id}", format!("{outcome:?}").to_lowercase());
        }
    }

    if changed {
        state.persist()?;
    }
    state.flush_toasts();
    Ok(())
}

pub fn list(state: &mut AppState) -> anyhow::Result<()> {
    for line in render_selection(&state.store()) {
        println!("{line}");
    }
    Ok(())
}

pub fn clear(state: &mut AppState) -> anyhow::Result<()> {
    if state.is_frozen() {
        notify_frozen(&mut state.toasts);
        state.flush_toasts();
        return Ok(());
    }

    let removed = {
        let mut store = state.store();
        let before = store.len();
        store.clear();
        before - store.len()
    };
    state.persist()?;
    if removed > 0 {
        state.toasts.info(format!("Cleared {removed} assets"));
    }
    state.flush_toasts();
    Ok(())
}

pub fn mode(state: &mut AppState, mode: Option<&str>) -> anyhow::Result<()> {
    let Some(raw) = mode else {
        println!("{}", state.store().mode().as_str());
        return Ok(());
    };

    let mode: SelectionMode = raw
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{e} (expected view or multi-select)"))?;
    state.store().set_mode(mode);
    state.persist()?;
    println!("{}", mode.as_str());
    Ok(())
}

/// Lines printed by `list`.
pub fn render_selection(store: &SelectionStore) -> Vec<String> {
    let mut lines = Vec::with_capacity(store.len() + 1);
    let total: u64 = store.selected().iter().map(|a| a.size).sum();
    let limit = match store.limit_state() {
        LimitState::Normal => "",
        LimitState::Approaching => " (approaching limit)",
        LimitState::Reached => " (limit reached)",
    };
    lines.push(format!(
        "{}/{MAX_SELECTION} selected, {}, mode {}{limit}",
        store.len(),
        format_size(total),
        store.mode().as_str()
    ));
    for asset in store.selected() {
        lines.push(format!(
            "  {}  {}/{}/{}.{}  {}",
            asset.id,
            asset.game_slug,
            asset.category_name,
            asset.name,
            asset.extension,
            format_size(asset.size)
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use skowt_protocol::Asset;

    fn asset(id: &str, size: u64) -> Asset {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": format!("Furina {id}"),
            "gameSlug": "genshin",
            "categoryName": "Characters",
            "extension": "png",
            "size": size,
        }))
        .unwrap()
    }

    #[test]
    fn empty_selection_header() {
        let store = SelectionStore::new();
        assert_eq!(render_selection(&store), ["0/500 selected, 0B, mode view"]);
    }

    #[test]
    fn lists_each_asset_with_path() {
        let mut store = SelectionStore::new();
        store.toggle(asset("a1", 2048));
        store.toggle(asset("a2", 1024));
        store.set_mode(SelectionMode::MultiSelect);

        let lines = render_selection(&store);
        assert_eq!(lines[0], "2/500 selected, 3KB, mode multi-select");
        assert_eq!(lines[1], "  a1  genshin/Characters/Furina a1.png  2KB");
        assert_eq!(lines.len(), 3);
    }
}
