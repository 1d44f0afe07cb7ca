use skowt_protocol::{Asset, AssetRef, MAX_SELECTION, SELECTION_WARNING_THRESHOLD, SelectionMode};
use tracing::debug;

/// Result of [`SelectionStore::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The asset was appended to the selection.
    Added,
    /// The asset was already selected and has been removed.
    Removed,
    /// The selection is full; nothing changed. Callers surface this to the user.
    LimitReached,
    /// An archive run is in progress; nothing changed.
    Frozen,
}

impl ToggleOutcome {
    /// Whether the selection was modified.
    pub fn changed(self) -> bool {
        matches!(self, Self::Added | Self::Removed)
    }
}

/// Result of [`SelectionStore::set_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetSelectionOutcome {
    /// Number of assets now selected.
    pub kept: usize,
    /// Number of input assets discarded (duplicates, over the cap, or frozen).
    pub dropped: usize,
}

/// How close the selection is to [`MAX_SELECTION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitState {
    Normal,
    Approaching,
    Reached,
}

/// Process-wide bulk-download selection state.
///
/// The owning app shares it behind a mutex; the archive pipeline only
/// ever sees a [`snapshot`](Self::snapshot) taken before the run flag is
/// raised.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: Vec<Asset>,
    mode: SelectionMode,
    is_mass_downloading: bool,
}

impl SelectionStore {
    /// Creates an empty store in view mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restores a store from previously persisted contents.
    ///
    /// The run flag is transient and always starts cleared. The cap and
    /// uniqueness rules are re-applied to whatever was on disk.
    pub fn restore(selected: Vec<Asset>, mode: SelectionMode) -> Self {
        let mut store = Self {
            selected: Vec::new(),
            mode,
            is_mass_downloading: false,
        };
        store.set_selection(selected);
        store
    }

    /// Adds the asset, or removes it if an asset with the same id is present.
    pub fn toggle(&mut self, asset: Asset) -> ToggleOutcome {
        if self.is_mass_downloading {
            debug!(asset = %asset.id, "selection frozen during mass download");
            return ToggleOutcome::Frozen;
        }

        if let Some(index) = self.position(&asset.id) {
            self.selected.remove(index);
            return ToggleOutcome::Removed;
        }

        if self.selected.len() >= MAX_SELECTION {
            debug!(asset = %asset.id, limit = MAX_SELECTION, "selection limit reached");
            return ToggleOutcome::LimitReached;
        }

        self.selected.push(asset);
        ToggleOutcome::Added
    }

    /// Replaces the selection wholesale.
    ///
    /// Duplicate ids keep their first occurrence and anything past
    /// [`MAX_SELECTION`] is dropped. Ignored while a run is in progress.
    pub fn set_selection(&mut self, assets: Vec<Asset>) -> SetSelectionOutcome {
        if self.is_mass_downloading {
            return SetSelectionOutcome {
                kept: self.selected.len(),
                dropped: assets.len(),
            };
        }

        let offered = assets.len();
        let mut next: Vec<Asset> = Vec::with_capacity(offered.min(MAX_SELECTION));
        for asset in assets {
            if next.len() >= MAX_SELECTION {
                break;
            }
            if next.iter().any(|a| a.id == asset.id) {
                continue;
            }
            next.push(asset);
        }

        let kept = next.len();
        if kept < offered {
            debug!(offered, kept, "selection replaced with truncation");
        }
        self.selected = next;
        SetSelectionOutcome {
            kept,
            dropped: offered - kept,
        }
    }

    /// Empties the selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Switches interaction mode. Never touches the selection.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        self.mode = mode;
    }

    /// Raises or lowers the run flag that freezes selection mutation.
    pub fn set_mass_downloading(&mut self, downloading: bool) {
        self.is_mass_downloading = downloading;
    }

    /// Current interaction mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether an archive run currently holds the selection.
    pub fn is_mass_downloading(&self) -> bool {
        self.is_mass_downloading
    }

    /// Whether an asset with this id is selected.
    pub fn is_selected(&self, asset_id: &str) -> bool {
        self.position(asset_id).is_some()
    }

    /// Selected assets in insertion order.
    pub fn selected(&self) -> &[Asset] {
        &self.selected
    }

    /// Number of selected assets.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Download projection of the selection, in insertion order.
    pub fn snapshot(&self) -> Vec<AssetRef> {
        self.selected.iter().map(AssetRef::from).collect()
    }

    /// Where the selection sits relative to the cap.
    pub fn limit_state(&self) -> LimitState {
        match self.selected.len() {
            n if n >= MAX_SELECTION => LimitState::Reached,
            n if n >= SELECTION_WARNING_THRESHOLD => LimitState::Approaching,
            _ => LimitState::Normal,
        }
    }

    fn position(&self, asset_id: &str) -> Option<usize> {
        self.selected.iter().position(|a| a.id == asset_id)
    }
}
