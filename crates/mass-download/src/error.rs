//! Mass download error types.

/// Errors produced by the bulk download pipeline.
#[derive(Debug, thiserror::Error)]
pub enum MassDownloadError {
    #[error("no assets selected for download")]
    EmptySelection,

    #[error("a mass download is already running")]
    AlreadyRunning,

    #[error("failed to download any of {attempted} assets")]
    AllDownloadsFailed { attempted: usize },

    #[error("archive failed: {0}")]
    ArchiveFailed(String),

    #[error("cancelled")]
    Cancelled,

    /// Single-asset fetch failure. Absorbed by the pipeline, never returned from a run.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("history error: {0}")]
    History(String),
}

impl From<skowt_archive::ArchiveError> for MassDownloadError {
    fn from(e: skowt_archive::ArchiveError) -> Self {
        Self::ArchiveFailed(e.to_string())
    }
}
