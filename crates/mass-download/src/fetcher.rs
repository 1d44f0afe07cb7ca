//! Asset fetch seam.

use std::future::Future;
use std::pin::Pin;

use skowt_protocol::AssetRef;

use crate::error::MassDownloadError;

/// Source of raw asset bytes.
///
/// The app implements this on top of the bridging proxy client. Using a
/// trait keeps the pipeline decoupled from HTTP and testable with mocks.
pub trait AssetFetcher: Send + Sync {
    /// Fetches one asset's binary content.
    ///
    /// Any error is treated as a per-asset failure.
    fn fetch<'a>(
        &'a self,
        asset: &'a AssetRef,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>, MassDownloadError>> + Send + 'a>>;
}
