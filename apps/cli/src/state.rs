use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use skowt_bridge::ApiClient;
use skowt_mass_download::SharedSelection;
use skowt_notifications::ToastQueue;
use skowt_selection::{
    JsonFilePersistence, PersistenceError, RunLock, SelectionPersistence, SelectionStore,
};
use tracing::debug;

use crate::config::CliConfig;

/// State shared by every command.
pub struct AppState {
    pub config: CliConfig,
    pub selection: SharedSelection,
    pub toasts: ToastQueue,
    persistence: JsonFilePersistence,
    run_lock: Option<RunLock>,
}

impl AppState {
    /// Loads the saved selection from the default location.
    pub fn load(config: CliConfig) -> anyhow::Result<Self> {
        let persistence = JsonFilePersistence::new(crate::config::selection_path()?);
        Self::open(config, persistence)
    }

    /// Loads the selection from `persistence`. If another process holds the
    /// run lock, the store starts frozen.
    pub fn open(config: CliConfig, persistence: JsonFilePersistence) -> anyhow::Result<Self> {
        let mut store = persistence.load_store();
        if persistence.is_run_locked()? {
            debug!("download running in another process, selection frozen");
            store.set_mass_downloading(true);
        }
        Ok(Self {
            config,
            selection: Arc::new(Mutex::new(store)),
            toasts: ToastQueue::new(),
            persistence,
            run_lock: None,
        })
    }

    pub fn store(&self) -> MutexGuard<'_, SelectionStore> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_frozen(&self) -> bool {
        self.store().is_mass_downloading()
    }

    /// Writes the current selection back to disk.
    ///
    /// Outside a run the lock is taken for the write, so this fails with
    /// [`PersistenceError::Locked`] while another process is downloading.
    pub fn persist(&self) -> anyhow::Result<()> {
        let _write_lock = match self.run_lock {
            Some(_) => None,
            None => Some(self.persistence.try_lock_run()?),
        };
        self.persistence.save(&self.store())?;
        Ok(())
    }

    /// Takes the run lock and reloads the selection from disk, so the run
    /// archives what was last saved.
    pub fn begin_run(&mut self) -> Result<(), PersistenceError> {
        let lock = self.persistence.try_lock_run()?;
        *self.store() = self.persistence.load_store();
        self.run_lock = Some(lock);
        Ok(())
    }

    /// Saves the result of a run and releases the lock. The on-disk
    /// selection is reloaded first and only cleared when the run succeeded.
    pub fn finish_run(&mut self, succeeded: bool) -> anyhow::Result<()> {
        let mut store = self.persistence.load_store();
        if succeeded {
            store.clear();
        }
        let saved = self.persistence.save(&store);
        *self.store() = store;
        self.run_lock = None;
        saved?;
        Ok(())
    }

    pub fn api(&self) -> anyhow::Result<ApiClient> {
        Ok(ApiClient::with_timeout(
            &self.config.api_url,
            self.config.token(),
            self.config.timeout(),
        )?)
    }

    /// Prints and discards pending toasts.
    pub fn flush_toasts(&mut self) {
        for toast in self.toasts.drain() {
            eprintln!("{toast}");
        }
    }
}
