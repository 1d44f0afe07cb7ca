//! Archive save targets.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use tracing::info;

use crate::error::MassDownloadError;

/// Destination for a finished archive (the "save to device" step).
pub trait ArchiveSink: Send + Sync {
    /// Persists `data` under `filename` and returns where it ended up.
    fn save<'a>(
        &'a self,
        filename: &'a str,
        data: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, MassDownloadError>> + Send + 'a>>;
}

/// Writes archives into a local directory, creating it if needed.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArchiveSink for DirectorySink {
    fn save<'a>(
        &'a self,
        filename: &'a str,
        data: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<String, MassDownloadError>> + Send + 'a>> {
        Box::pin(async move {
            tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
                MassDownloadError::ArchiveFailed(format!(
                    "failed to create {}: {e}",
                    self.dir.display()
                ))
            })?;

            let path = self.dir.join(filename);
            tokio::fs::write(&path, &data).await.map_err(|e| {
                MassDownloadError::ArchiveFailed(format!(
                    "failed to write {}: {e}",
                    path.display()
                ))
            })?;

            info!(path = %path.display(), bytes = data.len(), "archive saved");
            Ok(path.display().to_string())
        })
    }
}
