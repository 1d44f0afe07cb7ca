/// Hard cap on the number of assets a user can queue for bulk download.
pub const MAX_SELECTION: usize = 500;

/// Selection size at which the UI starts warning about the cap.
pub const SELECTION_WARNING_THRESHOLD: usize = 450;

/// Host serving raw asset files (`<host>/asset/<id>.<ext>`).
pub const DEFAULT_ASSET_HOST: &str = "https://pack.skowt.cc";

/// CORS-bridging proxy; the real asset URL goes in its `url` query parameter.
pub const DEFAULT_BRIDGE_URL: &str = "https://bridge.skowt.cc/";

/// REST API base used when no configuration overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8787";

/// Prefix of generated archive filenames.
pub const PRODUCT_SLUG: &str = "skowt-cc";
