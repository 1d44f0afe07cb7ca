//! Download history request/response shapes.

use serde::{Deserialize, Serialize};

use crate::types::Asset;

/// Body of `POST /asset/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryRequest {
    pub asset_ids: Vec<String>,
}

/// Response of `POST /asset/history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub history_id: String,
}

/// One recorded bulk download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadHistoryEntry {
    pub history_id: String,
    pub downloaded_at: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Page metadata returned with list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Response of `GET /user/download-history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadHistoryResponse {
    pub success: bool,
    #[serde(default)]
    pub download_history: Vec<DownloadHistoryEntry>,
    #[serde(default)]
    pub pagination: Pagination,
}
