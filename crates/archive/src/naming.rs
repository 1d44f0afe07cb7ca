use chrono::{DateTime, Utc};
use skowt_protocol::PRODUCT_SLUG;

/// Filename for a bulk archive created at `now`.
///
/// The UTC timestamp is second-resolution with `:` replaced by `-`, e.g.
/// `skowt-cc-assets-2025-03-14T09-26-53.zip`.
pub fn archive_filename(now: DateTime<Utc>) -> String {
    format!(
        "{PRODUCT_SLUG}-assets-{}.zip",
        now.format("%Y-%m-%dT%H-%M-%S")
    )
}
