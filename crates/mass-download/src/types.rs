//! Data types for the mass download flow.

/// An asset that could not be fetched and was left out of the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedAsset {
    pub id: String,
    pub name: String,
    pub reason: String,
}

/// Result of a successful archive run.
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    /// Number of assets in the snapshot.
    pub total: usize,
    /// Ids of the assets packed into the archive, in fetch order.
    pub included: Vec<String>,
    /// Assets skipped because their fetch failed.
    pub failed: Vec<FailedAsset>,
    /// Generated archive filename.
    pub filename: String,
    /// Where the sink put the archive.
    pub location: String,
    /// Compressed archive size.
    pub archive_bytes: usize,
}

impl ArchiveReport {
    /// Whether some assets were skipped.
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_when_any_failed() {
        let mut report = ArchiveReport {
            total: 2,
            included: vec!["a1".into(), "a2".into()],
            failed: vec![],
            filename: "x.zip".into(),
            location: "/tmp/x.zip".into(),
            archive_bytes: 10,
        };
        assert!(!report.is_partial());

        report.included.pop();
        report.failed.push(FailedAsset {
            id: "a2".into(),
            name: "two".into(),
            reason: "404".into(),
        });
        assert!(report.is_partial());
    }
}
