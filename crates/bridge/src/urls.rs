use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Url;

/// Characters escaped inside an asset id or extension path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Direct URL of an asset file: `<host>/asset/<id>.<ext>`.
pub fn asset_url(host: &str, id: &str, extension: &str) -> String {
    format!(
        "{}/asset/{}.{}",
        host.trim_end_matches('/'),
        utf8_percent_encode(id, SEGMENT),
        utf8_percent_encode(extension, SEGMENT)
    )
}

/// Bridge URL that proxies `asset_url` (passed in the `url` query parameter).
pub fn bridge_request_url(bridge: &Url, asset_url: &str) -> Url {
    let mut url = bridge.clone();
    url.query_pairs_mut().append_pair("url", asset_url);
    url
}
