//! HTTP clients for the skowt asset pack.
//!
//! - [`BridgeClient`] fetches raw asset files through the CORS-bridging
//!   proxy (`<bridge>?url=<host>/asset/<id>.<ext>`).
//! - [`ApiClient`] talks to the REST API for asset lookup and download
//!   history.

pub mod api;
pub mod client;
pub mod urls;

pub use api::ApiClient;
pub use client::{BridgeClient, BridgeConfig};
pub use urls::{asset_url, bridge_request_url};

use std::time::Duration;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the bridge and API clients.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request rejected by server: {0}")]
    Rejected(String),

    #[error("invalid session token")]
    InvalidToken,
}
