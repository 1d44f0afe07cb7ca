//! Bulk asset download pipeline.
//!
//! This crate implements the **business logic** for turning a selection
//! snapshot into one zip on the user's device. It has no HTTP or UI
//! dependencies; the app provides [`AssetFetcher`] and [`ArchiveSink`]
//! implementations that bridge to the real transport and storage.
//!
//! # Pipeline
//!
//! 1. **Fetch**: assets are fetched one at a time, in selection order;
//!    individual failures are logged and skipped
//! 2. **Archive**: successful bodies are packed into a Deflate zip laid
//!    out as `<game>/<category>/<name>.<ext>`
//! 3. **Save**: the zip is handed to the sink under a timestamped name
//!
//! [`MassDownloadSession`] wraps a run with the selection store's run
//! lock and clears the selection on success.

pub mod error;
pub mod fetcher;
pub mod pipeline;
pub mod session;
pub mod sink;
pub mod types;

// Re-export primary types for convenience.
pub use error::MassDownloadError;
pub use fetcher::AssetFetcher;
pub use pipeline::MassDownloadOrchestrator;
pub use session::{HistoryRecorder, MassDownloadSession, SessionOutcome, SharedSelection};
pub use sink::{ArchiveSink, DirectorySink};
pub use types::{ArchiveReport, FailedAsset};
