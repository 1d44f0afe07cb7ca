fn main() {
    println!("Run `cargo test -p wire-compat` to check API payload compatibility.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use skowt_protocol::{
        AssetDetailResponse, DownloadHistoryResponse, DownloadProgress, DownloadStatus,
        RecordHistoryRequest, RecordHistoryResponse, SelectionMode,
    };
    use skowt_selection::PersistedSelection;

    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Decodes a captured payload and checks that encoding it again
    /// reproduces the same JSON (key order ignored).
    fn roundtrip<T>(name: &str) -> T
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));
        assert_eq!(
            fixture, reserialized,
            "roundtrip mismatch for {name}:\n  API:  {fixture}\n  Rust: {reserialized}"
        );
        parsed
    }

    #[test]
    fn asset_detail_response() {
        let resp: AssetDetailResponse = roundtrip("asset_detail_response.json");
        let asset = resp.asset.into_asset();
        assert_eq!(asset.game_slug, "genshin-impact");
        assert_eq!(asset.category_name, "Splash Art");
        assert_eq!(asset.tags[1].color, None);
        assert_eq!(asset.uploaded_by.username.as_deref(), Some("skowt"));
    }

    #[test]
    fn download_history_response() {
        let resp: DownloadHistoryResponse = roundtrip("download_history_response.json");
        let entry = &resp.download_history[0];
        assert_eq!(entry.history_id, "hist_7f3a");
        assert_eq!(entry.assets[0].to_ref().extension, "png");
        assert!(!resp.pagination.has_next);
    }

    #[test]
    fn record_history_request() {
        let req: RecordHistoryRequest = roundtrip("record_history_request.json");
        assert_eq!(req.asset_ids.len(), 3);
    }

    #[test]
    fn record_history_response() {
        let resp: RecordHistoryResponse = roundtrip("record_history_response.json");
        assert_eq!(resp.history_id, "hist_7f3a");
    }

    #[test]
    fn download_progress_uses_zipping() {
        let progress: DownloadProgress = roundtrip("download_progress.json");
        assert_eq!(progress.status, DownloadStatus::Archiving);
        assert_eq!(progress.percent(), 60);
    }

    #[test]
    fn download_progress_accepts_archiving_alias() {
        let progress: DownloadProgress = serde_json::from_str(
            r#"{"current":5,"total":5,"currentAsset":"","status":"archiving"}"#,
        )
        .unwrap();
        assert_eq!(progress.status, DownloadStatus::Archiving);
        assert_eq!(progress.succeeded, 0);
    }

    #[test]
    fn persisted_selection() {
        let state: PersistedSelection = roundtrip("persisted_selection.json");
        assert_eq!(state.mode, SelectionMode::MultiSelect);

        let store = state.into_store();
        assert_eq!(store.len(), 1);
        assert!(!store.is_mass_downloading());
        assert!(store.is_selected("cm4x3acheron"));
    }
}
