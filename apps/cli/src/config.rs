//! CLI configuration.
//!
//! Lives at `<config dir>/skowt/config.json`; the saved selection sits
//! next to it in `selection.json`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use skowt_bridge::BridgeConfig;
use skowt_protocol::{DEFAULT_API_URL, DEFAULT_ASSET_HOST, DEFAULT_BRIDGE_URL};

const APP_DIR: &str = "skowt";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// REST API base URL.
    pub api_url: String,
    /// Host serving the asset files.
    pub asset_host: String,
    /// CORS bridge endpoint.
    pub bridge_url: String,
    /// Session token for authenticated endpoints (history).
    pub session_token: String,
    /// Where archives are written. Empty means the current directory.
    pub output_dir: String,
    pub request_timeout_secs: u64,
    /// Deflate level, 0-9.
    pub compression_level: i64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            asset_host: DEFAULT_ASSET_HOST.into(),
            bridge_url: DEFAULT_BRIDGE_URL.into(),
            session_token: String::new(),
            output_dir: String::new(),
            request_timeout_secs: 30,
            compression_level: 6,
        }
    }
}

impl CliConfig {
    /// Loads the config from the default location.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    /// Loads `path`. A missing file gives defaults; an unparsable one
    /// is reported and replaced by defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        match serde_json::from_str::<CliConfig>(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Saves to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        set_permissions_0600(path);
        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Sets one field from its `config.json` key.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "api_url" => self.api_url = value.into(),
            "asset_host" => self.asset_host = value.into(),
            "bridge_url" => self.bridge_url = value.into(),
            "session_token" => self.session_token = value.into(),
            "output_dir" => self.output_dir = value.into(),
            "request_timeout_secs" => {
                self.request_timeout_secs = value
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid request_timeout_secs {value:?}: {e}"))?;
            }
            "compression_level" => {
                let level: i64 = value
                    .parse()
                    .map_err(|e| anyhow::anyhow!("invalid compression_level {value:?}: {e}"))?;
                if !(0..=9).contains(&level) {
                    anyhow::bail!("compression_level must be between 0 and 9");
                }
                self.compression_level = level;
            }
            other => anyhow::bail!("unknown config key {other:?}"),
        }
        Ok(())
    }

    /// `key = value` lines with the session token masked.
    pub fn render(&self) -> Vec<String> {
        let token = if self.session_token.is_empty() { "" } else { "********" };
        vec![
            format!("api_url = {}", self.api_url),
            format!("asset_host = {}", self.asset_host),
            format!("bridge_url = {}", self.bridge_url),
            format!("session_token = {token}"),
            format!("output_dir = {}", self.output_dir),
            format!("request_timeout_secs = {}", self.request_timeout_secs),
            format!("compression_level = {}", self.compression_level),
        ]
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig {
            asset_host: self.asset_host.clone(),
            bridge_url: self.bridge_url.clone(),
            timeout: self.timeout(),
        }
    }

    /// Session token, if one is configured.
    pub fn token(&self) -> Option<&str> {
        Some(self.session_token.as_str()).filter(|t| !t.is_empty())
    }

    /// Output directory, with `--out` taking precedence.
    pub fn output_dir(&self, cli_out: Option<PathBuf>) -> PathBuf {
        cli_out.unwrap_or_else(|| {
            if self.output_dir.is_empty() {
                PathBuf::from(".")
            } else {
                PathBuf::from(&self.output_dir)
            }
        })
    }
}

// The token is a credential.
fn set_permissions_0600(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600));
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(config_base_dir()?.join(APP_DIR).join("config.json"))
}

pub fn selection_path() -> anyhow::Result<PathBuf> {
    Ok(config_base_dir()?.join(APP_DIR).join("selection.json"))
}

fn config_base_dir() -> anyhow::Result<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    #[cfg(target_os = "windows")]
    {
        let appdata = std::env::var("APPDATA")
            .map_err(|_| anyhow::anyhow!("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config"))
    }
}
