use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::ConfigSource;

pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:8000";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 600;
pub const DEFAULT_PREVIEW_URL: &str = "https://image.pollinations.ai";
pub const DEFAULT_PREVIEW_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_ARCHIVE_LATENCY_MS: u64 = 0;

/// Environment variable overriding the default state directory.
pub const HOME_ENV: &str = "LAUNCHKIT_HOME";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAUNCHKIT_CONFIG";

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway: GatewayConfig,
    pub preview: PreviewConfig,
    pub archive: ArchiveConfig,
    pub logging: LoggingConfig,
    /// Where each key (`section.name`) came from.
    pub source_attribution: HashMap<String, ConfigSource>,
}

/// `[gateway]`: the remote stage service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[preview]`: the image preview service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// `[archive]`: saved launch kits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArchiveConfig {
    /// Defaults to `$LAUNCHKIT_HOME`, then the platform data directory.
    pub state_dir: Option<PathBuf>,
    /// Artificial delay before each archive operation.
    pub latency_ms: Option<u64>,
}

/// `[logging]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_GATEWAY_URL.to_string()),
            timeout_secs: Some(DEFAULT_GATEWAY_TIMEOUT_SECS),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            base_url: Some(DEFAULT_PREVIEW_URL.to_string()),
            timeout_secs: Some(DEFAULT_PREVIEW_TIMEOUT_SECS),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: Some(false),
        }
    }
}

impl Config {
    pub fn gateway_url(&self) -> &str {
        self.gateway.base_url.as_deref().unwrap_or(DEFAULT_GATEWAY_URL)
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway.timeout_secs.unwrap_or(DEFAULT_GATEWAY_TIMEOUT_SECS))
    }

    pub fn preview_url(&self) -> &str {
        self.preview.base_url.as_deref().unwrap_or(DEFAULT_PREVIEW_URL)
    }

    pub fn preview_timeout(&self) -> Duration {
        Duration::from_secs(self.preview.timeout_secs.unwrap_or(DEFAULT_PREVIEW_TIMEOUT_SECS))
    }

    pub fn state_dir(&self) -> PathBuf {
        self.archive.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    pub fn archive_latency(&self) -> Duration {
        Duration::from_millis(self.archive.latency_ms.unwrap_or(DEFAULT_ARCHIVE_LATENCY_MS))
    }

    pub fn verbose(&self) -> bool {
        self.logging.verbose.unwrap_or(false)
    }
}

/// `$LAUNCHKIT_HOME`, else `<data dir>/launchkit`, else `./.launchkit`.
pub fn default_state_dir() -> PathBuf {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(home);
    }
    dirs::data_dir()
        .map(|dir| dir.join("launchkit"))
        .unwrap_or_else(|| PathBuf::from(".launchkit"))
}
