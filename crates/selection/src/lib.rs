//! Selection store for bulk asset downloads.
//!
//! Holds the ordered, de-duplicated set of assets a user has queued,
//! the current interaction mode, and the flag that freezes the set
//! while an archive run is in progress. All transitions are
//! synchronous and perform no I/O; persistence is layered on through
//! [`SelectionPersistence`].

pub mod persistence;
pub mod store;

pub use persistence::{
    JsonFilePersistence, MemoryPersistence, PersistedSelection, PersistenceError,
    RunLock, SelectionPersistence,
};
pub use store::{LimitState, SelectionStore, SetSelectionOutcome, ToggleOutcome};
