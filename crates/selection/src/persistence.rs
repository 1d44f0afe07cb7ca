//! Persistence adapters for the selection store.
//!
//! The selection and mode survive restarts; the run flag never does.
//! Across processes a run is held by an advisory lock on a file beside
//! the selection ([`RunLock`]).

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use skowt_protocol::{Asset, SelectionMode};
use tracing::{debug, warn};

use crate::store::SelectionStore;

/// Errors from persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("selection is locked by a running download ({})", .0.display())]
    Locked(PathBuf),
}

/// On-disk form of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSelection {
    #[serde(default)]
    pub selected_assets: Vec<Asset>,
    #[serde(default)]
    pub mode: SelectionMode,
}

impl From<&SelectionStore> for PersistedSelection {
    fn from(store: &SelectionStore) -> Self {
        Self {
            selected_assets: store.selected().to_vec(),
            mode: store.mode(),
        }
    }
}

impl PersistedSelection {
    /// Rebuilds a store; the run flag starts cleared.
    pub fn into_store(self) -> SelectionStore {
        SelectionStore::restore(self.selected_assets, self.mode)
    }
}

/// Loads and saves selection state.
pub trait SelectionPersistence: Send + Sync {
    /// Returns the persisted state, or defaults when nothing was saved.
    fn load(&self) -> Result<PersistedSelection, PersistenceError>;

    /// Writes the persistable part of `store`.
    fn save(&self, store: &SelectionStore) -> Result<(), PersistenceError>;

    /// Loads a store, falling back to an empty one if the saved state is unreadable.
    fn load_store(&self) -> SelectionStore {
        match self.load() {
            Ok(state) => state.into_store(),
            Err(e) => {
                warn!("failed to load saved selection, starting empty: {e}");
                SelectionStore::new()
            }
        }
    }
}

/// Persists the selection as pretty-printed JSON.
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the run lock file (`selection.lock` beside `selection.json`).
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    /// Takes the run lock without blocking.
    ///
    /// Fails with [`PersistenceError::Locked`] while any other handle,
    /// in this process or another, holds it.
    pub fn try_lock_run(&self) -> Result<RunLock, PersistenceError> {
        let path = self.lock_path();
        let file = self.open_lock_file(&path)?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                debug!("acquired run lock {:?}", path);
                Ok(RunLock { file, path })
            }
            Err(e) if is_contended(&e) => Err(PersistenceError::Locked(path)),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether another handle currently holds the run lock.
    pub fn is_run_locked(&self) -> Result<bool, PersistenceError> {
        match self.try_lock_run() {
            Ok(_lock) => Ok(false),
            Err(PersistenceError::Locked(_)) => Ok(true),
            Err(e) => Err(e),
        }
    }

    fn open_lock_file(&self, path: &Path) -> Result<File, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(path)?)
    }
}

fn is_contended(e: &std::io::Error) -> bool {
    e.kind() == std::io::ErrorKind::WouldBlock
        || e.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}

/// Held for the duration of an archive run; released on drop.
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("failed to release run lock {:?}: {e}", self.path);
        }
    }
}

impl SelectionPersistence for JsonFilePersistence {
    fn load(&self) -> Result<PersistedSelection, PersistenceError> {
        if !self.path.exists() {
            return Ok(PersistedSelection::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let state: PersistedSelection = serde_json::from_str(&data)?;
        debug!(
            "loaded {} selected asset(s) from {:?}",
            state.selected_assets.len(),
            self.path
        );
        Ok(state)
    }

    fn save(&self, store: &SelectionStore) -> Result<(), PersistenceError> {
        let state = PersistedSelection::from(store);
        let json = serde_json::to_string_pretty(&state)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, json)?;
        debug!(
            "persisted {} selected asset(s) to {:?}",
            state.selected_assets.len(),
            self.path
        );
        Ok(())
    }
}

/// Keeps the persisted state in memory. Useful for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryPersistence {
    state: Mutex<Option<PersistedSelection>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionPersistence for MemoryPersistence {
    fn load(&self) -> Result<PersistedSelection, PersistenceError> {
        let guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, store: &SelectionStore) -> Result<(), PersistenceError> {
        let mut guard = self.state.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(PersistedSelection::from(store));
        Ok(())
    }
}
