//! Wire types shared by every skowt crate.
//!
//! Covers the asset records returned by the REST API, the download
//! history endpoints, and the transient progress value emitted while a
//! bulk download is running.

pub mod constants;
pub mod history;
pub mod progress;
pub mod types;

// Re-export primary types for convenience.
pub use constants::{
    DEFAULT_API_URL, DEFAULT_ASSET_HOST, DEFAULT_BRIDGE_URL, MAX_SELECTION, PRODUCT_SLUG,
    SELECTION_WARNING_THRESHOLD,
};
pub use history::{
    DownloadHistoryEntry, DownloadHistoryResponse, Pagination, RecordHistoryRequest,
    RecordHistoryResponse,
};
pub use progress::{DownloadProgress, DownloadStatus};
pub use types::{
    Asset, AssetDetail, AssetDetailResponse, AssetRef, AssetTag, CategorySummary, GameSummary,
    SelectionMode, Uploader,
};
