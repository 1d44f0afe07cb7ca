//! REST API client: asset lookup and download history.

use std::time::Duration;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use skowt_protocol::{
    Asset, AssetDetailResponse, DownloadHistoryResponse, RecordHistoryRequest,
    RecordHistoryResponse,
};
use tracing::debug;

use crate::{DEFAULT_TIMEOUT, Error};

/// skowt REST API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    authenticated: bool,
}

impl ApiClient {
    /// Creates a client. `session_token`, when present, is sent as a Bearer token.
    pub fn new(base_url: &str, session_token: Option<&str>) -> Result<Self, Error> {
        Self::with_timeout(base_url, session_token, DEFAULT_TIMEOUT)
    }

    /// Creates a client with an explicit per-request timeout.
    pub fn with_timeout(
        base_url: &str,
        session_token: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let token = session_token.filter(|t| !t.is_empty());
        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {token}"))
                    .map_err(|_| Error::InvalidToken)?,
            );
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            authenticated: token.is_some(),
        })
    }

    /// Whether requests carry a session token.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Fetches one asset by id (`GET /asset/{id}`).
    pub async fn get_asset(&self, id: &str) -> Result<Asset, Error> {
        let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC).to_string();
        let resp: AssetDetailResponse = self.get(&format!("/asset/{encoded}"), &[]).await?;
        if !resp.success {
            return Err(Error::Rejected(format!("asset {id}")));
        }
        Ok(resp.asset.into_asset())
    }

    /// Lists the user's recorded bulk downloads (`GET /user/download-history`).
    pub async fn download_history(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<DownloadHistoryResponse, Error> {
        let params = [
            ("page".to_string(), page.to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        let resp: DownloadHistoryResponse = self.get("/user/download-history", &params).await?;
        if !resp.success {
            return Err(Error::Rejected("download history".into()));
        }
        Ok(resp)
    }

    /// Records a completed bulk download (`POST /asset/history`).
    ///
    /// Returns the server-assigned history id.
    pub async fn record_history(&self, asset_ids: &[String]) -> Result<String, Error> {
        let body = RecordHistoryRequest {
            asset_ids: asset_ids.to_vec(),
        };
        let url = format!("{}/asset/history", self.base_url);
        let resp = self.http.post(&url).json(&body).send().await?;
        let parsed: RecordHistoryResponse = read_json(resp).await?;
        if !parsed.success {
            return Err(Error::Rejected("record history".into()));
        }
        debug!(assets = asset_ids.len(), history = %parsed.history_id, "download history recorded");
        Ok(parsed.history_id)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, Error> {
        let url = format!("{}{}", self.base_url, endpoint);
        let resp = self.http.get(&url).query(params).send().await?;
        read_json(resp).await
    }
}

async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
