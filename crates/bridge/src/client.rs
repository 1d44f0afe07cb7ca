//! Asset fetcher routed through the CORS-bridging proxy.

use std::time::Duration;

use reqwest::Url;
use skowt_protocol::{DEFAULT_ASSET_HOST, DEFAULT_BRIDGE_URL};
use tracing::debug;

use crate::urls::{asset_url, bridge_request_url};
use crate::{DEFAULT_TIMEOUT, Error};

/// Where assets live and how to reach them.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Host serving `/asset/<id>.<ext>`.
    pub asset_host: String,
    /// Proxy endpoint that performs the cross-origin fetch.
    pub bridge_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            asset_host: DEFAULT_ASSET_HOST.into(),
            bridge_url: DEFAULT_BRIDGE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Fetches raw asset bytes through the bridge.
#[derive(Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    asset_host: String,
    bridge: Url,
}

impl BridgeClient {
    /// Creates a client from the given configuration.
    pub fn new(config: BridgeConfig) -> Result<Self, Error> {
        let bridge = Url::parse(&config.bridge_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {e}", config.bridge_url)))?;
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            asset_host: config.asset_host,
            bridge,
        })
    }

    /// URL the bridge is asked to fetch for this asset.
    pub fn asset_url(&self, id: &str, extension: &str) -> String {
        asset_url(&self.asset_host, id, extension)
    }

    /// Downloads the raw bytes of an asset.
    ///
    /// Any non-2xx status is an error; the body is not inspected.
    pub async fn fetch(&self, id: &str, extension: &str) -> Result<Vec<u8>, Error> {
        let target = self.asset_url(id, extension);
        let url = bridge_request_url(&self.bridge, &target);

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                body: "asset fetch failed".into(),
            });
        }

        let bytes = resp.bytes().await?.to_vec();
        debug!(asset = %id, bytes = bytes.len(), "asset fetched via bridge");
        Ok(bytes)
    }
}
