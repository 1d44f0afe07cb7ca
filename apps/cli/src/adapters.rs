//! Adapters binding the HTTP clients to the traits the download pipeline needs.

use std::future::Future;
use std::pin::Pin;

use skowt_bridge::{ApiClient, BridgeClient};
use skowt_mass_download::{AssetFetcher, HistoryRecorder, MassDownloadError};
use skowt_protocol::AssetRef;

/// Implements [`AssetFetcher`] over the CORS bridge.
pub struct BridgeFetcher {
    client: BridgeClient,
}

impl BridgeFetcher {
    pub fn new(client: BridgeClient) -> Self {
        Self { client }
    }
}

impl AssetFetcher for BridgeFetcher {
    fn fetch<'a>(
        &'a self,
        asset: &'a AssetRef,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, MassDownloadError>> + Send + 'a>> {
        Box::pin(async move {
            self.client
                .fetch(&asset.id, &asset.extension)
                .await
                .map_err(|e| MassDownloadError::Fetch(e.to_string()))
        })
    }
}

/// Implements [`HistoryRecorder`] over the REST API.
pub struct ApiHistoryRecorder {
    api: ApiClient,
}

impl ApiHistoryRecorder {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl HistoryRecorder for ApiHistoryRecorder {
    fn record<'a>(
        &'a self,
        asset_ids: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<String, MassDownloadError>> + Send + 'a>> {
        Box::pin(async move {
            self.api
                .record_history(asset_ids)
                .await
                .map_err(|e| MassDownloadError::History(e.to_string()))
        })
    }
}
