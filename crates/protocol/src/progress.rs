use serde::{Deserialize, Serialize};

/// Phase of a bulk download run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DownloadStatus {
    #[serde(rename = "downloading")]
    Downloading,
    #[serde(rename = "zipping", alias = "archiving")]
    Archiving,
    #[serde(rename = "complete")]
    Complete,
    #[serde(rename = "error")]
    Error,
}

/// Progress of one bulk download run.
///
/// While `Downloading`, `current` counts the fetch attempts already
/// finished (successful or not), so it grows by exactly one per asset.
/// `succeeded` counts the assets that made it into the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadProgress {
    pub current: usize,
    pub total: usize,
    #[serde(default)]
    pub succeeded: usize,
    #[serde(default)]
    pub current_asset: String,
    pub status: DownloadStatus,
}

impl DownloadProgress {
    /// Progress as a rounded percentage (0-100).
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = (self.current as f64 / self.total as f64 * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// Whether the run has reached a terminal phase.
    pub fn is_finished(&self) -> bool {
        matches!(self.status, DownloadStatus::Complete | DownloadStatus::Error)
    }

    /// One-line status shown under the progress bar.
    pub fn status_text(&self) -> String {
        match self.status {
            DownloadStatus::Downloading => {
                let name = if self.current_asset.is_empty() {
                    "assets"
                } else {
                    self.current_asset.as_str()
                };
                format!("Downloading {name}... ({}/{})", self.current, self.total)
            }
            DownloadStatus::Archiving => "Creating ZIP file...".into(),
            DownloadStatus::Complete => "Download complete!".into(),
            DownloadStatus::Error => "Download failed".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(current: usize, total: usize, status: DownloadStatus) -> DownloadProgress {
        DownloadProgress {
            current,
            total,
            succeeded: 0,
            current_asset: String::new(),
            status,
        }
    }

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&DownloadStatus::Archiving).unwrap(),
            "\"zipping\""
        );
        let s: DownloadStatus = serde_json::from_str("\"archiving\"").unwrap();
        assert_eq!(s, DownloadStatus::Archiving);
        let s: DownloadStatus = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(s, DownloadStatus::Error);
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(progress(1, 3, DownloadStatus::Downloading).percent(), 33);
        assert_eq!(progress(2, 3, DownloadStatus::Downloading).percent(), 67);
        assert_eq!(progress(5, 5, DownloadStatus::Complete).percent(), 100);
    }

    #[test]
    fn percent_zero_total() {
        assert_eq!(progress(0, 0, DownloadStatus::Downloading).percent(), 0);
    }

    #[test]
    fn status_text_uses_asset_name() {
        let mut p = progress(2, 10, DownloadStatus::Downloading);
        assert_eq!(p.status_text(), "Downloading assets... (2/10)");
        p.current_asset = "Furina".into();
        assert_eq!(p.status_text(), "Downloading Furina... (2/10)");
    }

    #[test]
    fn terminal_phases() {
        assert!(!progress(0, 1, DownloadStatus::Downloading).is_finished());
        assert!(!progress(1, 1, DownloadStatus::Archiving).is_finished());
        assert!(progress(1, 1, DownloadStatus::Complete).is_finished());
        assert!(progress(0, 1, DownloadStatus::Error).is_finished());
    }

    #[test]
    fn field_names() {
        let json = serde_json::to_value(progress(1, 2, DownloadStatus::Complete)).unwrap();
        assert_eq!(json["currentAsset"], "");
        assert_eq!(json["status"], "complete");
        assert_eq!(json["succeeded"], 0);
    }
}
